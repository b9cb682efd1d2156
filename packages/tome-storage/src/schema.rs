/// Renders the DDL for the two tables this core owns. The wider product
/// schema (tenancy, policies, triggers) lives with the product, not here.
pub fn render_schema() -> String {
	"\
CREATE TABLE IF NOT EXISTS files (
	file_id uuid PRIMARY KEY,
	file_name text NOT NULL,
	deleted boolean NOT NULL DEFAULT FALSE,
	ingested boolean NOT NULL DEFAULT FALSE,
	ocr_required boolean NOT NULL DEFAULT FALSE,
	ocr_complete boolean NOT NULL DEFAULT FALSE,
	ingest_retries integer NOT NULL DEFAULT 0,
	ingest_failed boolean NOT NULL DEFAULT FALSE,
	last_ingest_error text,
	created_at timestamptz NOT NULL DEFAULT now(),
	updated_at timestamptz NOT NULL DEFAULT now()
);
CREATE INDEX IF NOT EXISTS files_ingest_eligible_idx
	ON files (updated_at)
	WHERE NOT deleted AND NOT ingest_failed AND NOT ingested;
CREATE TABLE IF NOT EXISTS doc_chunks (
	id text PRIMARY KEY,
	file_id uuid NOT NULL REFERENCES files (file_id),
	file_name text NOT NULL,
	page_number integer,
	content text NOT NULL,
	created_at timestamptz NOT NULL DEFAULT now()
);
CREATE INDEX IF NOT EXISTS doc_chunks_file_id_idx ON doc_chunks (file_id)"
		.to_string()
}
