pub mod ingestor;
pub mod search;
pub mod summarizer;

mod error;

pub use error::{Error, Result};

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde_json::{Map, Value};

/// Builds the per-request header set: bearer auth from the configured key,
/// plus any configured default headers. Header names and values come from
/// operator config, so failures name the offending header.
pub fn auth_headers(api_key: &str, default_headers: &Map<String, Value>) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();
	let bearer = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|err| {
		Error::InvalidHeader { name: AUTHORIZATION.to_string(), reason: err.to_string() }
	})?;

	headers.insert(AUTHORIZATION, bearer);

	for (key, value) in default_headers {
		let Some(raw) = value.as_str() else {
			return Err(Error::InvalidHeader {
				name: key.clone(),
				reason: "value must be a string".to_string(),
			});
		};
		let name = HeaderName::from_bytes(key.as_bytes())
			.map_err(|err| Error::InvalidHeader { name: key.clone(), reason: err.to_string() })?;
		let value = HeaderValue::from_str(raw)
			.map_err(|err| Error::InvalidHeader { name: key.clone(), reason: err.to_string() })?;

		headers.insert(name, value);
	}

	Ok(headers)
}
