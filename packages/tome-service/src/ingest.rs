use serde::Serialize;
use uuid::Uuid;

use crate::{FileStore, Ingestor, Result};
use tome_config::Config;
use tome_domain::{IngestPhase, IngestState, RetryPolicy, ingest};

/// One eligible file as handed to the sweep.
#[derive(Clone, Debug)]
pub struct IngestFile {
	pub file_id: Uuid,
	pub file_name: String,
	pub state: IngestState,
}

#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct SweepReport {
	pub attempted: u32,
	pub ingested: u32,
	pub retrying: u32,
	pub dead_lettered: u32,
}

/// Attempts every eligible file once. Failures feed the retry governor and
/// are written back; a dead-lettered file is a counted state, never an
/// error, so one poison file cannot stall the sweep.
pub async fn sweep_once(
	cfg: &Config,
	store: &dyn FileStore,
	ingestor: &dyn Ingestor,
) -> Result<SweepReport> {
	let policy = RetryPolicy { max_retries: cfg.ingestion.max_retries };
	let files = store.list_eligible(cfg.ingestion.sweep_batch_size).await?;
	let mut report = SweepReport::default();

	for file in files {
		// The SQL listing already filters; the predicate re-check covers
		// records mutated between listing and attempt.
		if !ingest::is_eligible(&file.state) {
			continue;
		}

		report.attempted += 1;

		match ingestor.ingest(&cfg.providers.ingestor, file.file_id).await {
			Ok(()) => {
				store.mark_ingested(file.file_id).await?;

				report.ingested += 1;
			},
			Err(err) => {
				let mut state = file.state.clone();
				let phase = ingest::record_failure(&mut state, policy);

				store.record_failure(file.file_id, &state, &err.to_string()).await?;

				match phase {
					IngestPhase::Failed => {
						report.dead_lettered += 1;

						tracing::warn!(
							file_id = %file.file_id,
							file_name = %file.file_name,
							retries = state.ingest_retries,
							"File dead-lettered after exhausting retries."
						);
					},
					IngestPhase::Pending => {
						report.retrying += 1;

						tracing::info!(
							file_id = %file.file_id,
							error = %err,
							retries = state.ingest_retries,
							"Ingestion attempt failed. Will retry."
						);
					},
				}
			},
		}
	}

	Ok(report)
}

/// Observability hook: how many files are currently dead-lettered.
pub async fn failed_file_count(store: &dyn FileStore) -> Result<i64> {
	store.count_failed().await
}
