use std::collections::HashMap;

use sqlx::PgPool;

use crate::{Result, models::DocChunkRow};

/// Fetches chunks for a resume round. Rows come back in the requested id
/// order so a previous `pending_ids` keeps its ranking when re-selected;
/// ids with no row (pruned or re-chunked files) are silently skipped.
pub async fn fetch_by_ids(pool: &PgPool, ids: &[String]) -> Result<Vec<DocChunkRow>> {
	if ids.is_empty() {
		return Ok(Vec::new());
	}

	let rows = sqlx::query_as::<_, DocChunkRow>(
		"\
SELECT id, file_id, file_name, page_number, content, created_at
FROM doc_chunks
WHERE id = ANY($1)",
	)
	.bind(ids)
	.fetch_all(pool)
	.await?;

	Ok(reorder_by_request(rows, ids))
}

fn reorder_by_request(rows: Vec<DocChunkRow>, ids: &[String]) -> Vec<DocChunkRow> {
	let mut by_id: HashMap<String, DocChunkRow> =
		rows.into_iter().map(|row| (row.id.clone(), row)).collect();

	ids.iter().filter_map(|id| by_id.remove(id)).collect()
}

#[cfg(test)]
mod tests {
	use time::OffsetDateTime;
	use uuid::Uuid;

	use super::*;

	fn row(id: &str) -> DocChunkRow {
		DocChunkRow {
			id: id.to_string(),
			file_id: Uuid::nil(),
			file_name: "report.pdf".to_string(),
			page_number: None,
			content: String::new(),
			created_at: OffsetDateTime::UNIX_EPOCH,
		}
	}

	#[test]
	fn rows_follow_requested_order() {
		let rows = vec![row("c3"), row("c1"), row("c2")];
		let ids = ["c1", "c2", "c3"].map(String::from);
		let ordered = reorder_by_request(rows, &ids);
		let ordered_ids: Vec<&str> = ordered.iter().map(|r| r.id.as_str()).collect();

		assert_eq!(ordered_ids, vec!["c1", "c2", "c3"]);
	}

	#[test]
	fn missing_ids_are_skipped() {
		let rows = vec![row("c2")];
		let ids = ["c1", "c2"].map(String::from);
		let ordered = reorder_by_request(rows, &ids);

		assert_eq!(ordered.len(), 1);
		assert_eq!(ordered[0].id, "c2");
	}
}
