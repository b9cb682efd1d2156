use time::OffsetDateTime;
use uuid::Uuid;

use tome_domain::IngestState;

#[derive(Debug, sqlx::FromRow)]
pub struct FileRecord {
	pub file_id: Uuid,
	pub file_name: String,
	pub deleted: bool,
	pub ingested: bool,
	pub ocr_required: bool,
	pub ocr_complete: bool,
	pub ingest_retries: i32,
	pub ingest_failed: bool,
	pub last_ingest_error: Option<String>,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}
impl FileRecord {
	pub fn ingest_state(&self) -> IngestState {
		IngestState {
			ingest_retries: self.ingest_retries.max(0) as u32,
			ingest_failed: self.ingest_failed,
			deleted: self.deleted,
			ingested: self.ingested,
			ocr_required: self.ocr_required,
			ocr_complete: self.ocr_complete,
		}
	}
}

#[derive(Debug, sqlx::FromRow)]
pub struct DocChunkRow {
	pub id: String,
	pub file_id: Uuid,
	pub file_name: String,
	pub page_number: Option<i32>,
	pub content: String,
	pub created_at: OffsetDateTime,
}
