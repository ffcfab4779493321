use std::sync::LazyLock;

use regex::Regex;

/// Type emitted when no keyword group matches.
pub const DEFAULT_FACILITY_TYPE: &str = "Medical Facility";

/// Location emitted when neither a preposition phrase nor a postal code is found.
pub const DEFAULT_LOCATION: &str = "Anytown";

/// Ordered (keywords, emitted type) table, most specific first.
///
/// First match wins, so "oncologist hospital in Pune" resolves to
/// `Oncology Center` rather than `Hospital`.
pub const FACILITY_TYPE_RULES: &[(&[&str], &str)] = &[
    (&["oncologist", "cancer center"], "Oncology Center"),
    (&["surgeon", "surgery center"], "Surgical Center"),
    (&["cardiologist", "heart clinic"], "Cardiology Clinic"),
    (&["pediatrician", "child clinic"], "Pediatric Clinic"),
    (&["dermatologist", "skin clinic"], "Dermatology Clinic"),
    (&["hospital"], "Hospital"),
    (&["clinic"], "Clinic"),
    (&["doctor", "physician"], "Doctor's Office"),
    (&["specialist"], "Specialist Office"),
    (&["urgent care"], "Urgent Care Center"),
];

/// Prepositions that introduce the location part of a query, tried in order.
const LOCATION_PREPOSITIONS: &[&str] = &["in ", "near ", "at ", "around "];

static LOCATION_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",|\bon\b|\bfor\b|\band\b|\bwith\b|\bthe\b").expect("valid regex"));

static POSTAL_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{5}\b").expect("valid regex"));

/// Best-effort reading of a free-text facility query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpretedQuery {
    pub facility_type: String,
    pub location: String,
}

/// Split a facility query into its facility type and location.
///
/// Never fails: unrecognized input degrades to [`DEFAULT_FACILITY_TYPE`]
/// and [`DEFAULT_LOCATION`].
pub fn interpret_query(query: &str) -> InterpretedQuery {
    let lower = query.to_lowercase();
    InterpretedQuery {
        facility_type: extract_facility_type(&lower).to_string(),
        location: extract_location(&lower),
    }
}

/// First matching rule of [`FACILITY_TYPE_RULES`] for a lower-cased query.
pub fn extract_facility_type(lower_query: &str) -> &'static str {
    FACILITY_TYPE_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower_query.contains(k)))
        .map(|(_, facility_type)| *facility_type)
        .unwrap_or(DEFAULT_FACILITY_TYPE)
}

/// Location phrase of a lower-cased query, title-cased.
pub fn extract_location(lower_query: &str) -> String {
    for preposition in LOCATION_PREPOSITIONS {
        let Some(idx) = lower_query.find(preposition) else {
            continue;
        };
        let tail = &lower_query[idx + preposition.len()..];
        let phrase = LOCATION_DELIMITER
            .split(tail)
            .next()
            .unwrap_or_default()
            .trim();
        let cleaned = POSTAL_CODE.replace_all(phrase, "");
        let cleaned = cleaned.trim();

        if cleaned.len() > 2 || cleaned.split_whitespace().count() > 1 {
            return title_case(cleaned);
        }
    }

    match POSTAL_CODE.find(lower_query) {
        Some(code) => code.as_str().to_string(),
        None => DEFAULT_LOCATION.to_string(),
    }
}

/// Capitalizes each space-separated word. Runs of spaces are kept, so a
/// stripped postal code leaves its gap ("boston  ma").
fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
