use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ChunkSource, Error, Result, SearchProvider, Summarizer};
use tome_config::Config;
use tome_domain::{Candidate, SelectionLimits, select};

const MAX_EXCERPT_CHARS: usize = 300;

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseMode {
	#[default]
	Summary,
	StructuredResults,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SearchRequest {
	pub query: String,
	#[serde(default)]
	pub response_mode: ResponseMode,
	/// Per-request overrides for the configured selection limits. Tuning
	/// lives here or in config, never as literals at call sites.
	pub included_limit: Option<u32>,
	pub per_file_cap: Option<u32>,
}

/// A resume round: `resume_chunk_ids` is the `pending_chunk_ids` of an
/// earlier response. Accumulating and deduplicating ids across rounds is
/// the caller's bookkeeping; every round is selected statelessly.
#[derive(Clone, Debug, Deserialize)]
pub struct ResumeRequest {
	pub query: String,
	pub resume_chunk_ids: Vec<String>,
	#[serde(default)]
	pub response_mode: ResponseMode,
	pub included_limit: Option<u32>,
	pub per_file_cap: Option<u32>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SearchResponse {
	pub summary: Option<String>,
	pub summary_was_partial: bool,
	pub sources: Vec<Source>,
	pub can_resume: bool,
	pub pending_chunk_ids: Vec<String>,
	pub included_chunk_ids: Vec<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub retrieved_chunks: Option<Vec<Candidate<Value>>>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Source {
	pub id: String,
	pub file_name: Option<String>,
	pub page_number: Option<i64>,
	pub score: f64,
	pub excerpt: String,
}

/// One full search round: ranked matches from the search provider, batch
/// selection, then summarization of exactly the included batch.
pub async fn run(
	cfg: &Config,
	search: &dyn SearchProvider,
	summarizer: &dyn Summarizer,
	request: SearchRequest,
) -> Result<SearchResponse> {
	if request.query.trim().is_empty() {
		return Err(Error::InvalidRequest { message: "Query must be non-empty.".to_string() });
	}

	let matches =
		search.search(&cfg.providers.search, &request.query, cfg.search.max_results).await?;

	tracing::debug!(count = matches.len(), "Search provider returned matches.");

	respond(
		cfg,
		summarizer,
		&request.query,
		request.response_mode,
		limits_for(cfg, request.included_limit, request.per_file_cap),
		matches,
	)
	.await
}

/// Continues an earlier round from its pending ids, order preserved.
pub async fn resume(
	cfg: &Config,
	corpus: &dyn ChunkSource,
	summarizer: &dyn Summarizer,
	request: ResumeRequest,
) -> Result<SearchResponse> {
	if request.resume_chunk_ids.is_empty() {
		return Err(Error::InvalidRequest {
			message: "resume_chunk_ids must be non-empty.".to_string(),
		});
	}

	let matches = corpus.fetch_by_ids(&request.resume_chunk_ids).await?;

	tracing::debug!(
		requested = request.resume_chunk_ids.len(),
		found = matches.len(),
		"Fetched pending chunks for resume."
	);

	respond(
		cfg,
		summarizer,
		&request.query,
		request.response_mode,
		limits_for(cfg, request.included_limit, request.per_file_cap),
		matches,
	)
	.await
}

fn limits_for(
	cfg: &Config,
	included_limit: Option<u32>,
	per_file_cap: Option<u32>,
) -> SelectionLimits {
	SelectionLimits {
		included_limit: included_limit.unwrap_or(cfg.search.included_limit),
		per_file_cap: per_file_cap.unwrap_or(cfg.search.per_file_cap),
	}
}

async fn respond(
	cfg: &Config,
	summarizer: &dyn Summarizer,
	query: &str,
	response_mode: ResponseMode,
	limits: SelectionLimits,
	matches: Vec<Candidate<Value>>,
) -> Result<SearchResponse> {
	let selection = select(matches, limits);
	let included_chunk_ids = selection.included_ids();
	let (summary, summary_was_partial) =
		if response_mode == ResponseMode::Summary && !selection.included.is_empty() {
			let summary = summarizer
				.summarize(&cfg.providers.summarizer, query, &selection.included)
				.await?;

			(Some(summary.text), summary.was_partial)
		} else {
			(None, false)
		};
	let sources = selection.included.iter().map(source_from_chunk).collect();
	let can_resume = !selection.pending_ids.is_empty();
	let retrieved_chunks = (response_mode == ResponseMode::StructuredResults)
		.then_some(selection.included);

	Ok(SearchResponse {
		summary,
		summary_was_partial,
		sources,
		can_resume,
		pending_chunk_ids: selection.pending_ids,
		included_chunk_ids,
		retrieved_chunks,
	})
}

fn source_from_chunk(chunk: &Candidate<Value>) -> Source {
	let excerpt = chunk
		.payload
		.get("content")
		.and_then(|v| v.as_str())
		.unwrap_or("")
		.trim()
		.replace('\n', " ")
		.chars()
		.take(MAX_EXCERPT_CHARS)
		.collect();

	Source {
		id: chunk.usable_id().unwrap_or_default().to_string(),
		file_name: chunk.payload.get("file_name").and_then(|v| v.as_str()).map(str::to_string),
		page_number: chunk.payload.get("page_number").and_then(|v| v.as_i64()),
		score: chunk.rank_score,
		excerpt,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn excerpt_is_single_line_and_bounded() {
		let chunk = Candidate {
			id: Some("c1".to_string()),
			file_id: Some("f1".to_string()),
			rank_score: 0.5,
			payload: serde_json::json!({
				"content": format!("  line one\nline two {}", "x".repeat(400)),
			}),
		};
		let source = source_from_chunk(&chunk);

		assert!(source.excerpt.starts_with("line one line two"));
		assert!(!source.excerpt.contains('\n'));
		assert_eq!(source.excerpt.chars().count(), MAX_EXCERPT_CHARS);
	}
}
