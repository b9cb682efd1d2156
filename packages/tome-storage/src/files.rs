use sqlx::PgPool;
use uuid::Uuid;

use crate::{Result, models::FileRecord};
use tome_domain::IngestState;

/// Lists files the worker should attempt, oldest first. The WHERE clause is
/// the SQL mirror of the governor's eligibility predicate so ineligible
/// files never leave the database.
pub async fn list_eligible(pool: &PgPool, limit: u32) -> Result<Vec<FileRecord>> {
	let rows = sqlx::query_as::<_, FileRecord>(
		"\
SELECT *
FROM files
WHERE NOT deleted
	AND NOT ingest_failed
	AND NOT ingested
	AND (NOT ocr_required OR ocr_complete)
ORDER BY updated_at ASC
LIMIT $1",
	)
	.bind(i64::from(limit))
	.fetch_all(pool)
	.await?;

	Ok(rows)
}

/// Writes back the governor's bookkeeping after a failed attempt.
pub async fn record_failure(
	pool: &PgPool,
	file_id: Uuid,
	state: &IngestState,
	error: &str,
) -> Result<()> {
	sqlx::query(
		"\
UPDATE files
SET ingest_retries = $2,
	ingest_failed = $3,
	last_ingest_error = $4,
	updated_at = now()
WHERE file_id = $1",
	)
	.bind(file_id)
	.bind(state.ingest_retries as i32)
	.bind(state.ingest_failed)
	.bind(error)
	.execute(pool)
	.await?;

	Ok(())
}

/// Marks a file ingested. The retry count is left in place for audit.
pub async fn mark_ingested(pool: &PgPool, file_id: Uuid) -> Result<()> {
	sqlx::query(
		"\
UPDATE files
SET ingested = TRUE,
	last_ingest_error = NULL,
	updated_at = now()
WHERE file_id = $1",
	)
	.bind(file_id)
	.execute(pool)
	.await?;

	Ok(())
}

/// Count of dead-lettered files, for observability sweeps.
pub async fn count_failed(pool: &PgPool) -> Result<i64> {
	let count: i64 =
		sqlx::query_scalar("SELECT count(*) FROM files WHERE ingest_failed AND NOT deleted")
			.fetch_one(pool)
			.await?;

	Ok(count)
}
