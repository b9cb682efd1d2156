mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, Ingestion, LlmProviderConfig, Postgres, ProviderConfig, Providers, Search, Service,
	Storage,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.search.included_limit == 0 {
		return Err(Error::Validation {
			message: "search.included_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.search.per_file_cap == 0 {
		return Err(Error::Validation {
			message: "search.per_file_cap must be greater than zero.".to_string(),
		});
	}
	if cfg.search.max_results == 0 {
		return Err(Error::Validation {
			message: "search.max_results must be greater than zero.".to_string(),
		});
	}
	if cfg.ingestion.poll_interval_ms == 0 {
		return Err(Error::Validation {
			message: "ingestion.poll_interval_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.ingestion.sweep_batch_size == 0 {
		return Err(Error::Validation {
			message: "ingestion.sweep_batch_size must be greater than zero.".to_string(),
		});
	}
	if !cfg.providers.summarizer.temperature.is_finite() {
		return Err(Error::Validation {
			message: "providers.summarizer.temperature must be a finite number.".to_string(),
		});
	}
	if !(0.0..=2.0).contains(&cfg.providers.summarizer.temperature) {
		return Err(Error::Validation {
			message: "providers.summarizer.temperature must be in the range 0.0-2.0.".to_string(),
		});
	}
	if cfg.providers.summarizer.max_tokens == 0 {
		return Err(Error::Validation {
			message: "providers.summarizer.max_tokens must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.summarizer.model.trim().is_empty() {
		return Err(Error::Validation {
			message: "providers.summarizer.model must be non-empty.".to_string(),
		});
	}

	for (label, api_base, api_key, timeout_ms) in [
		(
			"search",
			&cfg.providers.search.api_base,
			&cfg.providers.search.api_key,
			cfg.providers.search.timeout_ms,
		),
		(
			"summarizer",
			&cfg.providers.summarizer.api_base,
			&cfg.providers.summarizer.api_key,
			cfg.providers.summarizer.timeout_ms,
		),
		(
			"ingestor",
			&cfg.providers.ingestor.api_base,
			&cfg.providers.ingestor.api_key,
			cfg.providers.ingestor.timeout_ms,
		),
	] {
		if api_base.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("Provider {label} api_base must be non-empty."),
			});
		}
		if api_key.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("Provider {label} api_key must be non-empty."),
			});
		}
		if timeout_ms == 0 {
			return Err(Error::Validation {
				message: format!("Provider {label} timeout_ms must be greater than zero."),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	trim_trailing_slash(&mut cfg.providers.search.api_base);
	trim_trailing_slash(&mut cfg.providers.summarizer.api_base);
	trim_trailing_slash(&mut cfg.providers.ingestor.api_base);
}

fn trim_trailing_slash(api_base: &mut String) {
	while api_base.ends_with('/') {
		api_base.pop();
	}
}
