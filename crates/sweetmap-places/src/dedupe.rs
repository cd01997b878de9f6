//! Merge candidate lists by provider id.

use std::collections::HashMap;

use crate::types::VenueCandidate;

/// Collapse candidates that share a `provider_id`.
///
/// The first-encountered record is kept, unless it has no rating and a later
/// duplicate does; then the later record replaces it in the first record's
/// position. Output order is the order in which each provider id first
/// appeared, which the ranker relies on as its final tie-break.
#[must_use]
pub fn dedupe(candidates: Vec<VenueCandidate>) -> Vec<VenueCandidate> {
    let mut kept: Vec<VenueCandidate> = Vec::with_capacity(candidates.len());
    let mut index_by_id: HashMap<String, usize> = HashMap::with_capacity(candidates.len());

    for candidate in candidates {
        match index_by_id.get(&candidate.provider_id) {
            Some(&idx) => {
                if kept[idx].rating.is_none() && candidate.rating.is_some() {
                    kept[idx] = candidate;
                }
            }
            None => {
                index_by_id.insert(candidate.provider_id.clone(), kept.len());
                kept.push(candidate);
            }
        }
    }

    kept
}
