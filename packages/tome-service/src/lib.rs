pub mod ingest;
pub mod search;
pub mod store;

mod error;

pub use error::{Error, Result};
pub use ingest::{IngestFile, SweepReport};
pub use search::{ResponseMode, ResumeRequest, SearchRequest, SearchResponse, Source};
pub use store::PgStore;

use std::{future::Future, pin::Pin};

use serde_json::Value;
use uuid::Uuid;

use tome_config::{LlmProviderConfig, ProviderConfig};
use tome_domain::{Candidate, IngestState};
use tome_providers::summarizer::Summary;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait SearchProvider
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		query: &'a str,
		max_results: u32,
	) -> BoxFuture<'a, Result<Vec<Candidate<Value>>>>;
}

pub trait Summarizer
where
	Self: Send + Sync,
{
	fn summarize<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		query: &'a str,
		included: &'a [Candidate<Value>],
	) -> BoxFuture<'a, Result<Summary>>;
}

pub trait Ingestor
where
	Self: Send + Sync,
{
	fn ingest<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		file_id: Uuid,
	) -> BoxFuture<'a, Result<()>>;
}

/// Corpus lookup used by resume rounds. Implementations must return chunks
/// in the requested id order.
pub trait ChunkSource
where
	Self: Send + Sync,
{
	fn fetch_by_ids<'a>(&'a self, ids: &'a [String])
	-> BoxFuture<'a, Result<Vec<Candidate<Value>>>>;
}

/// Durable per-file ingest records. The sweep assumes at most one writer
/// per file at a time; a single sweep loop per deployment upholds that.
pub trait FileStore
where
	Self: Send + Sync,
{
	fn list_eligible<'a>(&'a self, limit: u32) -> BoxFuture<'a, Result<Vec<IngestFile>>>;

	fn record_failure<'a>(
		&'a self,
		file_id: Uuid,
		state: &'a IngestState,
		error: &'a str,
	) -> BoxFuture<'a, Result<()>>;

	fn mark_ingested<'a>(&'a self, file_id: Uuid) -> BoxFuture<'a, Result<()>>;

	fn count_failed<'a>(&'a self) -> BoxFuture<'a, Result<i64>>;
}

/// Live HTTP collaborators, delegating to `tome_providers`.
pub struct HttpSearchProvider;
impl SearchProvider for HttpSearchProvider {
	fn search<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		query: &'a str,
		max_results: u32,
	) -> BoxFuture<'a, Result<Vec<Candidate<Value>>>> {
		Box::pin(async move { Ok(tome_providers::search::search(cfg, query, max_results).await?) })
	}
}

pub struct HttpSummarizer;
impl Summarizer for HttpSummarizer {
	fn summarize<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		query: &'a str,
		included: &'a [Candidate<Value>],
	) -> BoxFuture<'a, Result<Summary>> {
		Box::pin(async move {
			Ok(tome_providers::summarizer::summarize(cfg, query, included).await?)
		})
	}
}

pub struct HttpIngestor;
impl Ingestor for HttpIngestor {
	fn ingest<'a>(&'a self, cfg: &'a ProviderConfig, file_id: Uuid) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move { Ok(tome_providers::ingestor::ingest(cfg, file_id).await?) })
	}
}
