use std::collections::HashSet;

use tome_domain::{Candidate, SELECTION_WINDOW, SelectionLimits, select};

/// 13 files contributing 4 chunks each, interleaved by descending score the
/// way a hybrid search returns them.
fn corpus_13x4() -> Vec<Candidate<u32>> {
	(0..52)
		.map(|rank| Candidate {
			id: Some(format!("c{rank}")),
			file_id: Some(format!("f{}", rank % 13)),
			rank_score: 1.0 - rank as f64 * 0.01,
			payload: rank,
		})
		.collect()
}

fn limits(included_limit: u32, per_file_cap: u32) -> SelectionLimits {
	SelectionLimits { included_limit, per_file_cap }
}

#[test]
fn summary_batch_spans_thirteen_files() {
	let selection = select(corpus_13x4(), limits(25, 2));

	assert_eq!(selection.included.len(), 25);
	assert_eq!(selection.pending_ids.len(), 25);

	let distinct_files: HashSet<_> =
		selection.included.iter().filter_map(|c| c.file_id.clone()).collect();

	assert_eq!(distinct_files.len(), 13);

	for file in &distinct_files {
		let count = selection
			.included
			.iter()
			.filter(|c| c.file_id.as_deref() == Some(file.as_str()))
			.count();

		assert!(count <= 2, "file {file} admitted {count} chunks past the cap");
	}
}

#[test]
fn loose_cap_exhausts_the_window_in_one_pass() {
	let selection = select(corpus_13x4(), limits(50, 5));

	// Each file holds at most 4 chunks, so a cap of 5 never defers anything
	// and the whole 50-item window is admitted by the diversity pass.
	assert_eq!(selection.included.len(), 50);
	assert!(selection.pending_ids.is_empty());
}

#[test]
fn window_partitions_into_included_and_pending() {
	let matches: Vec<Candidate<()>> = (0..60)
		.map(|rank| Candidate {
			id: Some(format!("c{rank}")),
			file_id: Some(format!("f{}", rank % 7)),
			rank_score: 1.0 - rank as f64 * 0.01,
			payload: (),
		})
		.collect();
	let selection = select(matches, limits(25, 2));

	let mut seen = HashSet::new();

	for id in selection.included.iter().filter_map(|c| c.id.clone()) {
		assert!(seen.insert(id));
	}
	for id in &selection.pending_ids {
		assert!(seen.insert(id.clone()));
	}

	let window_ids: HashSet<String> = (0..SELECTION_WINDOW).map(|rank| format!("c{rank}")).collect();

	assert_eq!(seen, window_ids);
}

#[test]
fn included_is_capped_by_window_size() {
	let matches: Vec<Candidate<()>> = (0..60)
		.map(|rank| Candidate {
			id: Some(format!("c{rank}")),
			file_id: Some(format!("f{rank}")),
			rank_score: 0.0,
			payload: (),
		})
		.collect();
	let selection = select(matches, limits(200, 2));

	assert_eq!(selection.included.len(), SELECTION_WINDOW);
	assert!(selection.pending_ids.is_empty());
}

#[test]
fn short_input_fills_with_every_valid_chunk() {
	let matches: Vec<Candidate<()>> = (0..4)
		.map(|rank| Candidate {
			id: Some(format!("c{rank}")),
			file_id: Some("f0".to_string()),
			rank_score: 0.0,
			payload: (),
		})
		.collect();
	let selection = select(matches, limits(25, 2));

	// The cap defers c2 and c3 in pass 1; the fill pass recovers them.
	assert_eq!(selection.included.len(), 4);
	assert!(selection.pending_ids.is_empty());
}

#[test]
fn selection_is_deterministic() {
	let first = select(corpus_13x4(), limits(25, 2));
	let second = select(corpus_13x4(), limits(25, 2));

	assert_eq!(first.included_ids(), second.included_ids());
	assert_eq!(first.pending_ids, second.pending_ids);
}

#[test]
fn pending_ids_keep_window_order() {
	let selection = select(corpus_13x4(), limits(25, 2));
	let ranks: Vec<u32> = selection
		.pending_ids
		.iter()
		.map(|id| id.trim_start_matches('c').parse().expect("Numeric test id."))
		.collect();
	let mut sorted = ranks.clone();

	sorted.sort_unstable();

	assert_eq!(ranks, sorted);
	assert!(ranks.iter().all(|rank| (*rank as usize) < SELECTION_WINDOW));
}
