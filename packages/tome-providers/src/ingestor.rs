use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use uuid::Uuid;

use crate::{Error, Result};

/// Triggers one processing attempt (extraction, chunking, embedding) for a
/// file on the external ingestion service. The heavy work happens there;
/// this call only reports whether the attempt succeeded.
pub async fn ingest(cfg: &tome_config::ProviderConfig, file_id: Uuid) -> Result<()> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({ "file_id": file_id });
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	check_ingest_status(json)
}

fn check_ingest_status(json: Value) -> Result<()> {
	let status = json.get("status").and_then(|v| v.as_str()).unwrap_or("ok");

	if status == "ok" {
		return Ok(());
	}

	let detail = json.get("detail").and_then(|v| v.as_str()).unwrap_or("no detail");

	Err(Error::InvalidResponse { message: format!("Ingestion attempt failed: {detail}") })
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ok_status_passes() {
		assert!(check_ingest_status(serde_json::json!({ "status": "ok" })).is_ok());
		assert!(check_ingest_status(serde_json::json!({})).is_ok());
	}

	#[test]
	fn error_status_carries_detail() {
		let err = check_ingest_status(serde_json::json!({
			"status": "error",
			"detail": "unsupported mime type",
		}))
		.expect_err("Expected ingest failure.");

		assert!(err.to_string().contains("unsupported mime type"));
	}
}
