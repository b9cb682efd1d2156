use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};
use tome_domain::Candidate;

/// Runs one hybrid search against the external search service and returns
/// its ranked matches. Ranking is the provider's job; the matches are
/// passed downstream in the order received.
pub async fn search(
	cfg: &tome_config::ProviderConfig,
	query: &str,
	max_results: u32,
) -> Result<Vec<Candidate<Value>>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"query": query,
		"max_results": max_results,
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_matches(json)
}

fn parse_matches(json: Value) -> Result<Vec<Candidate<Value>>> {
	let matches = json
		.get("matches")
		.and_then(|v| v.as_array())
		.ok_or_else(|| Error::InvalidResponse {
			message: "Search response is missing matches array.".to_string(),
		})?;

	Ok(matches.iter().map(|item| candidate_from_match(item.clone())).collect())
}

fn candidate_from_match(item: Value) -> Candidate<Value> {
	let id = item.get("id").and_then(|v| v.as_str()).map(str::to_string);
	let file_id = item.get("file_id").and_then(|v| v.as_str()).map(str::to_string);
	let rank_score = best_score(&item);

	Candidate { id, file_id, rank_score, payload: item }
}

// Reranked score wins over the hybrid blend, which wins over the raw
// semantic score.
fn best_score(item: &Value) -> f64 {
	for key in ["rerank_score", "combined_score", "score"] {
		if let Some(score) = item.get(key).and_then(|v| v.as_f64()) {
			return score;
		}
	}

	0.0
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_matches_with_score_fallback() {
		let json = serde_json::json!({
			"matches": [
				{ "id": "c1", "file_id": "f1", "rerank_score": 0.9, "score": 0.1 },
				{ "id": "c2", "file_id": "f1", "combined_score": 0.5 },
				{ "id": "c3", "score": 0.2, "content": "text" },
				{ "file_id": "f2", "score": 0.1 }
			]
		});
		let parsed = parse_matches(json).expect("parse failed");

		assert_eq!(parsed.len(), 4);
		assert_eq!(parsed[0].rank_score, 0.9);
		assert_eq!(parsed[1].rank_score, 0.5);
		assert_eq!(parsed[2].rank_score, 0.2);
		assert_eq!(parsed[2].file_id, None);
		assert_eq!(parsed[3].id, None);
		assert_eq!(parsed[3].payload["file_id"], "f2");
	}

	#[test]
	fn missing_matches_array_is_an_error() {
		let json = serde_json::json!({ "results": [] });

		assert!(parse_matches(json).is_err());
	}
}
