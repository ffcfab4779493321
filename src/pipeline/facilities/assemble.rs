use std::collections::HashSet;

use crate::models::Facility;

/// Upper bound on entries returned by the lookup capability.
pub const MAX_LOOKUP_RESULTS: usize = 5;

/// Upper bound on entries surfaced in `suggestedFacilities`.
pub const MAX_SUGGESTED_FACILITIES: usize = 3;

/// Drop later entries whose (name, address) was already seen.
pub fn dedupe(candidates: Vec<Facility>) -> Vec<Facility> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    candidates
        .into_iter()
        .filter(|f| {
            let (name, address) = f.identity();
            seen.insert((name.to_string(), address.to_string()))
        })
        .collect()
}

pub fn truncate(mut facilities: Vec<Facility>, limit: usize) -> Vec<Facility> {
    facilities.truncate(limit);
    facilities
}

/// Shape raw candidates into a lookup result: deduplicated, at most
/// [`MAX_LOOKUP_RESULTS`] long. An empty list is a valid answer.
pub fn assemble_lookup_results(candidates: Vec<Facility>) -> Vec<Facility> {
    truncate(dedupe(candidates), MAX_LOOKUP_RESULTS)
}

/// Shape lookup results for `suggestedFacilities`.
pub fn assemble_suggestions(results: &[Facility]) -> Vec<Facility> {
    truncate(dedupe(results.to_vec()), MAX_SUGGESTED_FACILITIES)
}
