use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Bound on failed attempts per file. A file is dead-lettered once its
/// retry count strictly exceeds `max_retries`.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
	pub max_retries: u32,
}
impl Default for RetryPolicy {
	fn default() -> Self {
		Self { max_retries: DEFAULT_MAX_RETRIES }
	}
}

/// Per-file retry bookkeeping, mirrored from the durable file record.
/// Concurrent attempts on the same file must be serialized by the caller;
/// this state assumes at most one writer at a time.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct IngestState {
	pub ingest_retries: u32,
	pub ingest_failed: bool,
	pub deleted: bool,
	pub ingested: bool,
	pub ocr_required: bool,
	pub ocr_complete: bool,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestPhase {
	Pending,
	Failed,
}

/// Records one failed attempt. Dead-lettering is a state transition, not an
/// error: callers skip `Failed` files via [`is_eligible`] and surface the
/// count through observability.
pub fn record_failure(state: &mut IngestState, policy: RetryPolicy) -> IngestPhase {
	state.ingest_retries = state.ingest_retries.saturating_add(1);

	if state.ingest_retries > policy.max_retries {
		state.ingest_failed = true;
	}
	if state.ingest_failed { IngestPhase::Failed } else { IngestPhase::Pending }
}

/// Records a successful attempt. The retry count stays on the record for
/// audit; it stops blocking because eligibility checks `ingested`.
pub fn record_success(state: &mut IngestState) {
	state.ingested = true;
}

/// Whether the ingestion worker should attempt this file on a sweep.
/// `deleted` short-circuits everything else.
pub fn is_eligible(state: &IngestState) -> bool {
	!state.deleted
		&& !state.ingest_failed
		&& !state.ingested
		&& (!state.ocr_required || state.ocr_complete)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sixth_failure_dead_letters_with_default_policy() {
		let policy = RetryPolicy::default();
		let mut state = IngestState::default();

		for attempt in 1..=5 {
			assert_eq!(record_failure(&mut state, policy), IngestPhase::Pending);
			assert_eq!(state.ingest_retries, attempt);
			assert!(is_eligible(&state));
		}

		assert_eq!(record_failure(&mut state, policy), IngestPhase::Failed);
		assert!(state.ingest_failed);
		assert!(!is_eligible(&state));
	}

	#[test]
	fn success_keeps_retry_count_but_clears_eligibility() {
		let policy = RetryPolicy::default();
		let mut state = IngestState::default();

		record_failure(&mut state, policy);
		record_failure(&mut state, policy);
		record_success(&mut state);

		assert_eq!(state.ingest_retries, 2);
		assert!(state.ingested);
		assert!(!state.ingest_failed);
		assert!(!is_eligible(&state));
	}

	#[test]
	fn deleted_short_circuits_regardless_of_retry_state() {
		let state = IngestState { deleted: true, ..IngestState::default() };

		assert!(!is_eligible(&state));

		let state = IngestState { deleted: true, ingest_failed: true, ..IngestState::default() };

		assert!(!is_eligible(&state));
	}

	#[test]
	fn pending_ocr_blocks_until_complete() {
		let mut state = IngestState { ocr_required: true, ..IngestState::default() };

		assert!(!is_eligible(&state));

		state.ocr_complete = true;

		assert!(is_eligible(&state));
	}

	#[test]
	fn zero_max_retries_dead_letters_on_first_failure() {
		let mut state = IngestState::default();

		assert_eq!(record_failure(&mut state, RetryPolicy { max_retries: 0 }), IngestPhase::Failed);
	}
}
