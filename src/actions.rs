//! Caller-facing actions.
//!
//! `submit_symptoms` is the single entry point used by the HTTP layer: it
//! validates the request, runs the analysis on its own task, and always
//! answers with an [`AnalysisServerResult`].

use std::sync::Arc;

use crate::models::{AnalysisInput, AnalysisServerResult};
use crate::pipeline::analysis::{ChatModel, SymptomAnalyzer};
use crate::pipeline::facilities::FacilityLookup;

/// Minimum symptom description length (characters, after trimming).
pub const MIN_SYMPTOM_LENGTH: usize = 10;

pub const VALIDATION_MESSAGE: &str = "Please provide a more detailed description of your symptoms and medical history (at least 10 characters).";

pub const UNEXPECTED_FAILURE_MESSAGE: &str =
    "An unexpected error occurred while analyzing your symptoms. Please try again.";

/// Validation only. `Err` carries the caller-facing message.
pub fn validate_input(input: &AnalysisInput) -> Result<(), String> {
    if input.symptoms_and_history.trim().chars().count() < MIN_SYMPTOM_LENGTH {
        return Err(VALIDATION_MESSAGE.to_string());
    }
    Ok(())
}

/// Validate and analyze. Never panics into the caller.
pub async fn submit_symptoms<M, L>(
    analyzer: Arc<SymptomAnalyzer<M, L>>,
    input: AnalysisInput,
) -> AnalysisServerResult
where
    M: ChatModel + 'static,
    L: FacilityLookup + 'static,
{
    if let Err(message) = validate_input(&input) {
        tracing::debug!("Rejected symptom submission: description too short");
        return AnalysisServerResult::error(message);
    }

    let handle = tokio::spawn(async move { analyzer.analyze(&input).await });
    match handle.await {
        Ok(output) => AnalysisServerResult::Success(output),
        Err(e) => {
            tracing::error!(error = %e, "Symptom analysis task failed");
            AnalysisServerResult::error(UNEXPECTED_FAILURE_MESSAGE)
        }
    }
}
