use serde::{Deserialize, Serialize};

use super::facility::Facility;

/// Summary returned when the reasoning step produced nothing usable.
pub const ANALYSIS_UNAVAILABLE_SUMMARY: &str =
    "Analysis could not be completed. Please try again later or consult a healthcare professional.";

/// A symptom analysis request as handed over by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisInput {
    pub symptoms_and_history: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl AnalysisInput {
    pub fn new(symptoms_and_history: &str, location: Option<&str>) -> Self {
        Self {
            symptoms_and_history: symptoms_and_history.to_string(),
            location: location.map(str::to_string),
        }
    }
}

/// Structured guidance for one analysis request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutput {
    pub possible_conditions: Vec<String>,
    pub recommended_specialists: Vec<String>,
    pub recommended_tests: Vec<String>,
    pub suggested_facilities: Vec<Facility>,
    pub summary: String,
}

impl AnalysisOutput {
    /// Default answer when the model produced no structured output.
    pub fn unavailable() -> Self {
        Self {
            summary: ANALYSIS_UNAVAILABLE_SUMMARY.to_string(),
            ..Self::default()
        }
    }
}

/// Caller-facing result: either the analysis or an error message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisServerResult {
    Error { error: String },
    Success(AnalysisOutput),
}

impl AnalysisServerResult {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}
