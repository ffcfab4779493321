use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::AnalysisError;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
    Tool,
}

/// A single message in an Ollama `/api/chat` exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    /// Set on `tool` messages: which tool produced the content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
}

impl ChatMessage {
    fn with_role(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_name: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::with_role(ChatRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::with_role(ChatRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::with_role(ChatRole::Assistant, content)
    }

    pub fn tool(tool_name: &str, content: impl Into<String>) -> Self {
        Self {
            tool_name: Some(tool_name.to_string()),
            ..Self::with_role(ChatRole::Tool, content)
        }
    }

    pub fn with_tool_calls(mut self, tool_calls: Vec<ToolCall>) -> Self {
        self.tool_calls = tool_calls;
        self
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub function: ToolCallFunction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallFunction {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

impl ToolCall {
    pub fn new(name: &str, arguments: Value) -> Self {
        Self {
            function: ToolCallFunction {
                name: name.to_string(),
                arguments,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }

    /// String argument by key. Some models send arguments as a JSON-encoded
    /// string instead of an object; both forms are accepted.
    pub fn string_argument(&self, key: &str) -> Option<String> {
        let from_object = |obj: &Value| obj.get(key).and_then(Value::as_str).map(str::to_string);
        match &self.function.arguments {
            Value::String(raw) => serde_json::from_str::<Value>(raw)
                .ok()
                .and_then(|parsed| from_object(&parsed)),
            other => from_object(other),
        }
    }
}

/// Tool advertised to the model (`tools` field of `/api/chat`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub kind: String,
    pub function: ToolFunction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolFunction {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl ToolDefinition {
    pub fn function(name: &str, description: &str, parameters: Value) -> Self {
        Self {
            kind: "function".to_string(),
            function: ToolFunction {
                name: name.to_string(),
                description: description.to_string(),
                parameters,
            },
        }
    }
}

/// Chat-capable language model (allows mocking).
///
/// Returns the assistant message for the conversation so far. `tools` may be
/// empty, in which case the model cannot request a tool call.
pub trait ChatModel: Send + Sync {
    fn chat(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
    ) -> impl Future<Output = Result<ChatMessage, AnalysisError>> + Send;

    fn model_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tool_message_carries_tool_name() {
        let msg = ChatMessage::tool("fetch_nearby_medical_facilities", "[]");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "tool");
        assert_eq!(json["tool_name"], "fetch_nearby_medical_facilities");
        assert!(json.get("tool_calls").is_none());
    }

    #[test]
    fn assistant_message_with_tool_calls_deserializes() {
        let raw = json!({
            "role": "assistant",
            "content": "",
            "tool_calls": [
                { "function": { "name": "fetch_nearby_medical_facilities",
                                "arguments": { "query": "cardiologists in Pune" } } }
            ]
        });
        let msg: ChatMessage = serde_json::from_value(raw).unwrap();
        assert!(msg.has_tool_calls());
        assert_eq!(
            msg.tool_calls[0].string_argument("query").as_deref(),
            Some("cardiologists in Pune")
        );
    }

    #[test]
    fn string_encoded_arguments_are_accepted() {
        let call = ToolCall::new("t", Value::String(r#"{"query":"clinics in London"}"#.into()));
        assert_eq!(call.string_argument("query").as_deref(), Some("clinics in London"));
    }

    #[test]
    fn missing_argument_is_none() {
        let call = ToolCall::new("t", json!({}));
        assert!(call.string_argument("query").is_none());
        let garbage = ToolCall::new("t", Value::String("not json".into()));
        assert!(garbage.string_argument("query").is_none());
    }

    #[test]
    fn tool_definition_serializes_openai_shape() {
        let def = ToolDefinition::function("f", "does f", json!({ "type": "object" }));
        let json = serde_json::to_value(&def).unwrap();
        assert_eq!(json["type"], "function");
        assert_eq!(json["function"]["name"], "f");
    }
}
