use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Fixed universe size considered per call. Everything past the first 50
/// matches is dropped from both outputs, which bounds cost and defines the
/// pool `pending_ids` is drawn from.
pub const SELECTION_WINDOW: usize = 50;

/// One retrieved unit of document content. The payload is owned by the
/// search provider and passed through untouched.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Candidate<P> {
	#[serde(default)]
	pub id: Option<String>,
	#[serde(default)]
	pub file_id: Option<String>,
	#[serde(default)]
	pub rank_score: f64,
	pub payload: P,
}
impl<P> Candidate<P> {
	/// Missing and blank ids are equally unusable; such chunks never appear
	/// in `included` nor in `pending_ids`.
	pub fn usable_id(&self) -> Option<&str> {
		self.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
	}
}

/// Call-boundary tuning for one selection. Both limits are honored
/// literally: a zero `included_limit` yields an empty batch, and a zero
/// `per_file_cap` pushes every admission into the fill pass. Negative
/// values are unrepresentable.
#[derive(Clone, Copy, Debug)]
pub struct SelectionLimits {
	pub included_limit: u32,
	pub per_file_cap: u32,
}

#[derive(Debug)]
pub struct Selection<P> {
	pub included: Vec<Candidate<P>>,
	pub pending_ids: Vec<String>,
}
impl<P> Selection<P> {
	pub fn included_ids(&self) -> Vec<String> {
		self.included.iter().filter_map(|c| c.usable_id().map(str::to_string)).collect()
	}
}

/// Splits a ranked candidate list into a bounded, file-diverse `included`
/// batch and the `pending_ids` remainder for a later resume call.
///
/// Two passes over the window, in the caller's order (the selector never
/// re-sorts):
/// 1. admit while under `included_limit` and under `per_file_cap` for the
///    chunk's file;
/// 2. if slots remain, re-walk the window ignoring the cap and append
///    not-yet-admitted chunks.
///
/// Contract: fill-pass admissions are appended after all diversity-pass
/// admissions, and `pending_ids` keeps window order. Duplicate ids are a
/// caller error; they are tracked by window position here, so the outputs
/// are not meaningful in that case. Pure and deterministic; never fails.
pub fn select<P>(mut matches: Vec<Candidate<P>>, limits: SelectionLimits) -> Selection<P> {
	matches.truncate(SELECTION_WINDOW);

	let included_limit = limits.included_limit as usize;
	let mut admitted = vec![false; matches.len()];
	let mut order: Vec<usize> = Vec::new();
	let mut per_file: HashMap<&str, u32> = HashMap::new();

	for (idx, candidate) in matches.iter().enumerate() {
		if order.len() >= included_limit {
			break;
		}
		if candidate.usable_id().is_none() {
			continue;
		}
		// Chunks without a file_id have no diversity group and are uncapped.
		if let Some(file_id) = candidate.file_id.as_deref() {
			let count = per_file.entry(file_id).or_insert(0);

			if *count >= limits.per_file_cap {
				continue;
			}

			*count += 1;
		}

		admitted[idx] = true;
		order.push(idx);
	}

	if order.len() < included_limit {
		for (idx, candidate) in matches.iter().enumerate() {
			if order.len() >= included_limit {
				break;
			}
			if admitted[idx] || candidate.usable_id().is_none() {
				continue;
			}

			admitted[idx] = true;
			order.push(idx);
		}
	}

	let mut slots: Vec<Option<Candidate<P>>> = matches.into_iter().map(Some).collect();
	let mut included = Vec::with_capacity(order.len());

	for idx in order {
		if let Some(candidate) = slots[idx].take() {
			included.push(candidate);
		}
	}

	let mut pending_ids = Vec::new();

	for slot in &slots {
		if let Some(candidate) = slot
			&& let Some(id) = candidate.usable_id()
		{
			pending_ids.push(id.to_string());
		}
	}

	Selection { included, pending_ids }
}
