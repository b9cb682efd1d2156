use std::fmt::Write as _;
use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};
use tome_domain::Candidate;

const MAX_CHUNK_CHARS: usize = 3_000;

const SYSTEM_PROMPT: &str = "You are an insightful research assistant. Read the provided \
	document chunks and produce a concise, accurate synthesis that directly answers the user's \
	query. Cite evidence using the chunk ids (id=...).";

#[derive(Clone, Debug)]
pub struct Summary {
	pub text: String,
	/// True when the completion stopped at the token limit rather than at a
	/// natural end.
	pub was_partial: bool,
}

/// Summarizes exactly the included batch. The caller decides what is in the
/// batch; nothing is re-ranked or filtered here.
pub async fn summarize(
	cfg: &tome_config::LlmProviderConfig,
	query: &str,
	included: &[Candidate<Value>],
) -> Result<Summary> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let context = build_context(included);
	let body = serde_json::json!({
		"model": cfg.model,
		"temperature": cfg.temperature,
		"max_tokens": cfg.max_tokens,
		"messages": [
			{ "role": "system", "content": SYSTEM_PROMPT },
			{
				"role": "user",
				"content": format!(
					"User query: {query}\n\nSearch results:\n{context}\n\nPlease provide a \
					detailed summary based on these results."
				),
			},
		],
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_summary(json)
}

/// Renders the prompt context: one annotated block per chunk, 1-based, with
/// the content truncated so a single oversized chunk cannot crowd out the
/// rest of the batch.
pub fn build_context(included: &[Candidate<Value>]) -> String {
	let mut out = String::new();

	for (idx, chunk) in included.iter().enumerate() {
		let id = chunk.usable_id().unwrap_or("?");
		let file_name = chunk.payload.get("file_name").and_then(|v| v.as_str()).unwrap_or("?");
		let page = chunk.payload.get("page_number").and_then(|v| v.as_i64()).unwrap_or(0);
		let content: String = chunk
			.payload
			.get("content")
			.and_then(|v| v.as_str())
			.unwrap_or("")
			.chars()
			.take(MAX_CHUNK_CHARS)
			.collect();

		if idx > 0 {
			out.push_str("\n\n");
		}

		let _ = write!(
			out,
			"[#{n} id={id} file={file_name} page={page} score={score:.4}]\n{content}",
			n = idx + 1,
			score = chunk.rank_score,
		);
	}

	out
}

fn parse_summary(json: Value) -> Result<Summary> {
	let choice = json
		.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.ok_or_else(|| Error::InvalidResponse {
			message: "Summarizer response is missing choices.".to_string(),
		})?;
	let text = choice
		.get("message")
		.and_then(|msg| msg.get("content"))
		.and_then(|c| c.as_str())
		.ok_or_else(|| Error::InvalidResponse {
			message: "Summarizer choice is missing message content.".to_string(),
		})?
		.to_string();
	let was_partial =
		choice.get("finish_reason").and_then(|v| v.as_str()).is_some_and(|r| r == "length");

	Ok(Summary { text, was_partial })
}

#[cfg(test)]
mod tests {
	use super::*;

	fn chunk(id: &str, content: &str) -> Candidate<Value> {
		Candidate {
			id: Some(id.to_string()),
			file_id: Some("f1".to_string()),
			rank_score: 0.1234,
			payload: serde_json::json!({
				"file_name": "report.pdf",
				"page_number": 7,
				"content": content,
			}),
		}
	}

	#[test]
	fn context_annotates_each_chunk() {
		let context = build_context(&[chunk("c1", "alpha"), chunk("c2", "beta")]);

		assert!(context.starts_with("[#1 id=c1 file=report.pdf page=7 score=0.1234]\nalpha"));
		assert!(context.contains("\n\n[#2 id=c2 "));
	}

	#[test]
	fn context_truncates_oversized_content() {
		let context = build_context(&[chunk("c1", &"x".repeat(10_000))]);

		assert!(context.len() < 3_200);
	}

	#[test]
	fn parses_summary_and_partial_flag() {
		let json = serde_json::json!({
			"choices": [
				{ "message": { "content": "the gist" }, "finish_reason": "length" }
			]
		});
		let summary = parse_summary(json).expect("parse failed");

		assert_eq!(summary.text, "the gist");
		assert!(summary.was_partial);
	}

	#[test]
	fn complete_summary_is_not_partial() {
		let json = serde_json::json!({
			"choices": [
				{ "message": { "content": "the gist" }, "finish_reason": "stop" }
			]
		});
		let summary = parse_summary(json).expect("parse failed");

		assert!(!summary.was_partial);
	}

	#[test]
	fn missing_choices_is_an_error() {
		assert!(parse_summary(serde_json::json!({})).is_err());
	}
}
