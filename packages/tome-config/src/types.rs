use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	#[serde(default)]
	pub search: Search,
	#[serde(default)]
	pub ingestion: Ingestion,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub search: ProviderConfig,
	pub summarizer: LlmProviderConfig,
	pub ingestor: ProviderConfig,
}

#[derive(Debug, Deserialize)]
pub struct ProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct LlmProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	#[serde(default = "default_max_tokens")]
	pub max_tokens: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

/// Batch-selection tuning. These are the call-boundary knobs the selector
/// receives; the 50-item selection window is a fixed design constant, not
/// configuration.
#[derive(Debug, Deserialize)]
pub struct Search {
	#[serde(default = "default_included_limit")]
	pub included_limit: u32,
	#[serde(default = "default_per_file_cap")]
	pub per_file_cap: u32,
	#[serde(default = "default_max_results")]
	pub max_results: u32,
}
impl Default for Search {
	fn default() -> Self {
		Self {
			included_limit: default_included_limit(),
			per_file_cap: default_per_file_cap(),
			max_results: default_max_results(),
		}
	}
}

#[derive(Debug, Deserialize)]
pub struct Ingestion {
	#[serde(default = "default_max_retries")]
	pub max_retries: u32,
	#[serde(default = "default_poll_interval_ms")]
	pub poll_interval_ms: u64,
	#[serde(default = "default_sweep_batch_size")]
	pub sweep_batch_size: u32,
}
impl Default for Ingestion {
	fn default() -> Self {
		Self {
			max_retries: default_max_retries(),
			poll_interval_ms: default_poll_interval_ms(),
			sweep_batch_size: default_sweep_batch_size(),
		}
	}
}

fn default_included_limit() -> u32 {
	25
}

fn default_per_file_cap() -> u32 {
	2
}

fn default_max_results() -> u32 {
	100
}

fn default_max_tokens() -> u32 {
	4_096
}

fn default_max_retries() -> u32 {
	5
}

fn default_poll_interval_ms() -> u64 {
	5_000
}

fn default_sweep_batch_size() -> u32 {
	16
}
