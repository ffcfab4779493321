//! Facility lookup decisions, kept apart from the model call.
//!
//! Two steps: the gate decides whether a lookup may happen at all, then the
//! query builder turns recommended specialists plus the location into a
//! facility query. Integration copies lookup results into the answer.

use crate::models::{AnalysisOutput, Facility};
use crate::pipeline::facilities::assemble::assemble_suggestions;

/// Facility kind used when no specialist was recommended.
pub const DEFAULT_FACILITY_KIND: &str = "hospitals";

/// Whether this request may look up facilities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupGate {
    Closed,
    Open { location: String },
}

impl LookupGate {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Open { location } => Some(location.as_str()),
            Self::Closed => None,
        }
    }
}

/// Open only for a location that is non-empty after trimming.
pub fn lookup_gate(location: Option<&str>) -> LookupGate {
    match location.map(str::trim) {
        Some(loc) if !loc.is_empty() => LookupGate::Open {
            location: loc.to_string(),
        },
        _ => LookupGate::Closed,
    }
}

/// `"{kind} in {location}"`, kind taken from the first usable specialist.
pub fn build_facility_query(specialists: &[String], location: &str) -> String {
    let kind = specialists
        .iter()
        .find_map(|s| facility_kind_for(s))
        .unwrap_or_else(|| DEFAULT_FACILITY_KIND.to_string());
    format!("{kind} in {}", location.trim())
}

/// "Cardiologist (heart specialist)" → "cardiologists".
pub fn facility_kind_for(specialist: &str) -> Option<String> {
    let base = specialist.split('(').next().unwrap_or_default().trim();
    if base.is_empty() {
        return None;
    }
    let mut kind = base.to_lowercase();
    if !kind.ends_with('s') {
        kind.push('s');
    }
    Some(kind)
}

/// Words that introduce a location in a facility query.
const LOCATION_WORDS: &[&str] = &["in", "near", "at", "around"];

/// Query to run for a model tool call.
///
/// The model's own query is kept when it already names a place; otherwise the
/// location is appended. A blank query falls back to the policy query.
pub fn resolve_tool_query(model_query: Option<&str>, specialists: &[String], location: &str) -> String {
    match model_query.map(str::trim) {
        Some(query) if !query.is_empty() => {
            if names_location(query, location) {
                query.to_string()
            } else {
                format!("{query} in {}", location.trim())
            }
        }
        _ => build_facility_query(specialists, location),
    }
}

/// A query names a place when it has a location word or mentions the first
/// comma-separated part of the location ("Tokyo" of "Tokyo, Japan").
fn names_location(query: &str, location: &str) -> bool {
    let lower = query.to_lowercase();
    let place = location.split(',').next().unwrap_or_default().trim().to_lowercase();
    (!place.is_empty() && lower.contains(&place))
        || lower.split_whitespace().any(|word| LOCATION_WORDS.contains(&word))
}

/// Merge lookup results into the model's answer.
///
/// A closed gate always yields no facilities. An open gate copies up to three
/// results verbatim; with none, the summary notes that nothing was found.
pub fn integrate_facilities(
    mut output: AnalysisOutput,
    gate: &LookupGate,
    results: &[Facility],
) -> AnalysisOutput {
    match gate {
        LookupGate::Closed => output.suggested_facilities = Vec::new(),
        LookupGate::Open { location } => {
            output.suggested_facilities = assemble_suggestions(results);
            if output.suggested_facilities.is_empty() {
                let note = format!("No specific medical facilities were found for {location}.");
                if !output.summary.contains(&note) {
                    if !output.summary.trim().is_empty() {
                        output.summary.push(' ');
                    }
                    output.summary.push_str(&note);
                }
            }
        }
    }
    output
}
