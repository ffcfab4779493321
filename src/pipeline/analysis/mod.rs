//! Symptom analysis: model reasoning plus the facility tool round-trip.
//!
//! Flow: gate → prompt → chat (tool offered only when the gate is open) →
//! optional lookup → final structured answer → facility integration.

pub mod types;
pub mod ollama;
pub mod prompt;
pub mod parser;
pub mod policy;
pub mod orchestrator;

#[cfg(test)]
pub mod mock;

pub use ollama::OllamaChatClient;
pub use orchestrator::SymptomAnalyzer;
pub use policy::{build_facility_query, lookup_gate, LookupGate};
pub use types::{ChatMessage, ChatModel, ChatRole, ToolCall, ToolDefinition};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Ollama is not running at {0}")]
    OllamaConnection(String),

    #[error("Ollama returned error (status {status}): {body}")]
    OllamaError { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    #[error("JSON parsing error: {0}")]
    JsonParsing(String),

    #[error("Model returned no structured output")]
    EmptyResponse,
}
