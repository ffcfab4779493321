use serde_json::json;

use super::policy::LookupGate;
use super::types::ToolDefinition;

/// Name of the facility lookup tool offered to the model.
pub const FACILITY_TOOL_NAME: &str = "fetch_nearby_medical_facilities";

pub const ANALYSIS_SYSTEM_PROMPT: &str = r#"You are HealthMind, an AI medical assistant that analyzes symptoms and medical history to suggest possible conditions, specialists, and tests. You are NOT a doctor and your output is not a diagnosis.

RULES:
1. Base your analysis ONLY on the patient information provided.
2. List possible conditions, never state that the patient has a condition.
3. Recommend specialists by their title (e.g. "Cardiologist", "Dermatologist").
4. Recommend tests a clinician would commonly consider for these symptoms.
5. If symptoms suggest an emergency, say so first in the summary and advise seeking immediate care.
6. Use plain, patient-friendly language.

OUTPUT FORMAT:
Respond with a single JSON object and nothing else:
{
  "possibleConditions": ["..."],
  "recommendedSpecialists": ["..."],
  "recommendedTests": ["..."],
  "summary": "..."
}"#;

const FACILITY_TOOL_INSTRUCTIONS: &str = r#"

FACILITY LOOKUP:
The patient gave a location. Call the `fetch_nearby_medical_facilities` tool exactly once with a query combining the most relevant specialist you recommend and the patient's location, e.g. "cardiologists in Pune". If you cannot identify a specialist, use "hospitals in <location>". Copy the location exactly as given. After the tool answers, give your final JSON answer. If the tool returns no facilities, mention in the summary that no specific facilities were found for that location."#;

const NO_FACILITY_INSTRUCTIONS: &str = r#"

FACILITY LOOKUP:
No location was provided. Do not suggest facilities and do not call any tool."#;

/// System prompt for the analysis turn. Facility instructions depend on the gate.
pub fn build_system_prompt(gate: &LookupGate) -> String {
    let mut prompt = ANALYSIS_SYSTEM_PROMPT.to_string();
    prompt.push_str(if gate.is_open() {
        FACILITY_TOOL_INSTRUCTIONS
    } else {
        NO_FACILITY_INSTRUCTIONS
    });
    prompt
}

/// User turn: the sanitized patient text in delimiters, plus the location.
pub fn build_user_prompt(symptoms_and_history: &str, gate: &LookupGate) -> String {
    let mut prompt = format!(
        "<PATIENT_INFORMATION>\n{}\n</PATIENT_INFORMATION>\n",
        symptoms_and_history.trim()
    );
    if let Some(location) = gate.location() {
        prompt.push_str(&format!("\nPatient location: {location}\n"));
    }
    prompt
}

/// Tool message sent back when the model calls a tool it cannot use.
pub fn tool_unavailable_message(tool_name: &str) -> String {
    json!({
        "error": format!("Tool `{tool_name}` is not available for this request. Give your final JSON answer now.")
    })
    .to_string()
}

/// JSON schema advertised for the facility tool.
pub fn facility_tool_definition() -> ToolDefinition {
    ToolDefinition::function(
        FACILITY_TOOL_NAME,
        "Find medical facilities near a location. Returns up to five facilities with name, address and type. An empty list means nothing was found.",
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Facility type and location, e.g. \"cardiologists in Pune\" or \"hospitals near 10001\"."
                }
            },
            "required": ["query"]
        }),
    )
}
