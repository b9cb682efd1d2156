use std::time::Duration;

use color_eyre::Result;

use tome_config::Config;
use tome_service::{HttpIngestor, PgStore, ingest};

/// Single-loop ingestion sweeper. One instance per deployment keeps the
/// per-file retry accounting free of concurrent writers.
pub async fn run_worker(config: Config, store: PgStore) -> Result<()> {
	let ingestor = HttpIngestor;
	let poll_interval = Duration::from_millis(config.ingestion.poll_interval_ms);

	tracing::info!(
		max_retries = config.ingestion.max_retries,
		sweep_batch_size = config.ingestion.sweep_batch_size,
		poll_interval_ms = config.ingestion.poll_interval_ms,
		"Ingestion worker started."
	);

	loop {
		match ingest::sweep_once(&config, &store, &ingestor).await {
			Ok(report) =>
				if report.attempted > 0 {
					tracing::info!(
						attempted = report.attempted,
						ingested = report.ingested,
						retrying = report.retrying,
						dead_lettered = report.dead_lettered,
						"Sweep finished."
					);

					if report.dead_lettered > 0 {
						match ingest::failed_file_count(&store).await {
							Ok(count) =>
								tracing::warn!(failed_files = count, "Dead-letter backlog grew."),
							Err(err) =>
								tracing::error!(error = %err, "Failed to count dead-lettered files."),
						}
					}
				},
			Err(err) => tracing::error!(error = %err, "Sweep failed."),
		}

		tokio::time::sleep(poll_interval).await;
	}
}
