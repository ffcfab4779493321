use serde::Deserialize;
use serde_json::Value;

use super::AnalysisError;
use crate::models::AnalysisOutput;

/// Parse the model's final answer into an [`AnalysisOutput`].
///
/// Accepts a bare JSON object, a ```json fenced block, or an object embedded
/// in surrounding prose. List items that are not non-blank strings are
/// skipped. Facilities are never read from the model; they come from the
/// lookup only.
pub fn parse_analysis_response(response: &str) -> Result<AnalysisOutput, AnalysisError> {
    if response.trim().is_empty() {
        return Err(AnalysisError::EmptyResponse);
    }

    let json_str = extract_json_object(response)?;
    let raw: RawAnalysis =
        serde_json::from_str(json_str).map_err(|e| AnalysisError::JsonParsing(e.to_string()))?;

    let output = AnalysisOutput {
        possible_conditions: string_list(raw.possible_conditions.as_deref().unwrap_or_default()),
        recommended_specialists: string_list(raw.recommended_specialists.as_deref().unwrap_or_default()),
        recommended_tests: string_list(raw.recommended_tests.as_deref().unwrap_or_default()),
        suggested_facilities: Vec::new(),
        summary: raw
            .summary
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string(),
    };

    let has_content = !output.possible_conditions.is_empty()
        || !output.recommended_specialists.is_empty()
        || !output.recommended_tests.is_empty()
        || !output.summary.is_empty();
    if !has_content {
        return Err(AnalysisError::EmptyResponse);
    }

    Ok(output)
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct RawAnalysis {
    #[serde(alias = "possible_conditions")]
    possible_conditions: Option<Vec<Value>>,
    #[serde(alias = "recommended_specialists")]
    recommended_specialists: Option<Vec<Value>>,
    #[serde(alias = "recommended_tests")]
    recommended_tests: Option<Vec<Value>>,
    summary: Option<String>,
}

fn extract_json_object(response: &str) -> Result<&str, AnalysisError> {
    if let Some(fence) = response.find("```json") {
        let content_start = fence + 7;
        let content_len = response[content_start..]
            .find("```")
            .ok_or_else(|| AnalysisError::MalformedResponse("Unclosed JSON block".into()))?;
        return Ok(response[content_start..content_start + content_len].trim());
    }

    let start = response.find('{');
    let end = response.rfind('}');
    match (start, end) {
        (Some(start), Some(end)) if start < end => Ok(&response[start..=end]),
        _ => Err(AnalysisError::MalformedResponse("No JSON object found".into())),
    }
}

fn string_list(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_json() {
        let output = parse_analysis_response(
            r#"{"possibleConditions":["Angina"],"recommendedSpecialists":["Cardiologist"],
                "recommendedTests":["ECG","Lipid panel"],"summary":"Chest pain on exertion."}"#,
        )
        .unwrap();
        assert_eq!(output.possible_conditions, vec!["Angina"]);
        assert_eq!(output.recommended_specialists, vec!["Cardiologist"]);
        assert_eq!(output.recommended_tests, vec!["ECG", "Lipid panel"]);
        assert_eq!(output.summary, "Chest pain on exertion.");
        assert!(output.suggested_facilities.is_empty());
    }

    #[test]
    fn parses_fenced_block() {
        let response = "Here is my analysis:\n```json\n{\"summary\": \"Mild cold.\"}\n```\nTake care.";
        let output = parse_analysis_response(response).unwrap();
        assert_eq!(output.summary, "Mild cold.");
    }

    #[test]
    fn parses_object_inside_prose() {
        let response = "Sure! {\"possibleConditions\": [\"Migraine\"]} Hope this helps.";
        let output = parse_analysis_response(response).unwrap();
        assert_eq!(output.possible_conditions, vec!["Migraine"]);
        assert_eq!(output.summary, "");
    }

    #[test]
    fn accepts_snake_case_keys() {
        let output =
            parse_analysis_response(r#"{"recommended_tests":["CBC"],"summary":"x"}"#).unwrap();
        assert_eq!(output.recommended_tests, vec!["CBC"]);
    }

    #[test]
    fn null_lists_are_empty() {
        let output =
            parse_analysis_response(r#"{"possibleConditions":null,"summary":"s"}"#).unwrap();
        assert!(output.possible_conditions.is_empty());
    }

    #[test]
    fn skips_non_string_and_blank_items() {
        let output = parse_analysis_response(
            r#"{"possibleConditions":["Flu", 42, null, "  ", {"name":"x"}],"summary":"s"}"#,
        )
        .unwrap();
        assert_eq!(output.possible_conditions, vec!["Flu"]);
    }

    #[test]
    fn ignores_model_supplied_facilities() {
        let output = parse_analysis_response(
            r#"{"summary":"s","suggestedFacilities":[{"name":"Fake","address":"Nowhere","type":"Hospital"}]}"#,
        )
        .unwrap();
        assert!(output.suggested_facilities.is_empty());
    }

    #[test]
    fn empty_response_is_error() {
        assert!(matches!(parse_analysis_response("  "), Err(AnalysisError::EmptyResponse)));
    }

    #[test]
    fn empty_object_is_error() {
        assert!(matches!(
            parse_analysis_response(r#"{"possibleConditions":[],"summary":"  "}"#),
            Err(AnalysisError::EmptyResponse)
        ));
    }

    #[test]
    fn prose_without_json_is_malformed() {
        assert!(matches!(
            parse_analysis_response("I cannot help with that."),
            Err(AnalysisError::MalformedResponse(_))
        ));
    }

    #[test]
    fn unclosed_fence_is_malformed() {
        assert!(matches!(
            parse_analysis_response("```json\n{\"summary\":\"x\"}"),
            Err(AnalysisError::MalformedResponse(_))
        ));
    }

    #[test]
    fn invalid_json_is_parse_error() {
        assert!(matches!(
            parse_analysis_response("{\"summary\": }"),
            Err(AnalysisError::JsonParsing(_))
        ));
    }
}
