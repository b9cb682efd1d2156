pub mod ingest;
pub mod selection;

pub use ingest::{DEFAULT_MAX_RETRIES, IngestPhase, IngestState, RetryPolicy};
pub use selection::{Candidate, SELECTION_WINDOW, Selection, SelectionLimits, select};
