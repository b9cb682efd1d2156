use serde_json::Value;
use uuid::Uuid;

use crate::{BoxFuture, ChunkSource, FileStore, IngestFile, Result};
use tome_domain::{Candidate, IngestState};
use tome_storage::{chunks, db::Db, files, models::DocChunkRow};

/// Postgres-backed implementation of the corpus and file-record seams.
pub struct PgStore {
	db: Db,
}
impl PgStore {
	pub fn new(db: Db) -> Self {
		Self { db }
	}
}
impl ChunkSource for PgStore {
	fn fetch_by_ids<'a>(
		&'a self,
		ids: &'a [String],
	) -> BoxFuture<'a, Result<Vec<Candidate<Value>>>> {
		Box::pin(async move {
			let rows = chunks::fetch_by_ids(&self.db.pool, ids).await?;

			Ok(rows.into_iter().map(candidate_from_row).collect())
		})
	}
}
impl FileStore for PgStore {
	fn list_eligible<'a>(&'a self, limit: u32) -> BoxFuture<'a, Result<Vec<IngestFile>>> {
		Box::pin(async move {
			let records = files::list_eligible(&self.db.pool, limit).await?;

			Ok(records
				.into_iter()
				.map(|record| IngestFile {
					file_id: record.file_id,
					file_name: record.file_name.clone(),
					state: record.ingest_state(),
				})
				.collect())
		})
	}

	fn record_failure<'a>(
		&'a self,
		file_id: Uuid,
		state: &'a IngestState,
		error: &'a str,
	) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move { Ok(files::record_failure(&self.db.pool, file_id, state, error).await?) })
	}

	fn mark_ingested<'a>(&'a self, file_id: Uuid) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move { Ok(files::mark_ingested(&self.db.pool, file_id).await?) })
	}

	fn count_failed<'a>(&'a self) -> BoxFuture<'a, Result<i64>> {
		Box::pin(async move { Ok(files::count_failed(&self.db.pool).await?) })
	}
}

/// Resume rounds carry no fresh ranking; the preserved id order is the
/// ranking, so the score is left at zero.
fn candidate_from_row(row: DocChunkRow) -> Candidate<Value> {
	Candidate {
		id: Some(row.id),
		file_id: Some(row.file_id.to_string()),
		rank_score: 0.0,
		payload: serde_json::json!({
			"file_name": row.file_name,
			"page_number": row.page_number,
			"content": row.content,
		}),
	}
}
