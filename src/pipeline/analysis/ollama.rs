use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::types::{ChatMessage, ChatModel, ToolDefinition};
use super::AnalysisError;

/// Ollama HTTP client for local LLM inference via `/api/chat`.
pub struct OllamaChatClient {
    base_url: String,
    model: String,
    client: reqwest::Client,
    timeout_secs: u64,
    temperature: f32,
}

impl OllamaChatClient {
    /// Create a client pointing at an Ollama instance.
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> Result<Self, AnalysisError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AnalysisError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client,
            timeout_secs,
            temperature: 0.2,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Names of models installed on the Ollama instance (`/api/tags`).
    pub async fn list_models(&self) -> Result<Vec<String>, AnalysisError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::OllamaError {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: OllamaTagsResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::ResponseParsing(e.to_string()))?;

        Ok(parsed.models.into_iter().map(|m| m.name).collect())
    }

    /// Whether the configured model is installed.
    pub async fn is_model_available(&self) -> Result<bool, AnalysisError> {
        let models = self.list_models().await?;
        Ok(models.iter().any(|m| m.starts_with(&self.model)))
    }

    /// JSON mode constrains the output grammar and can suppress tool calls,
    /// so it is only requested on turns that offer no tools.
    fn chat_request<'a>(
        &'a self,
        messages: &'a [ChatMessage],
        tools: &'a [ToolDefinition],
    ) -> OllamaChatRequest<'a> {
        OllamaChatRequest {
            model: &self.model,
            messages,
            tools,
            format: tools.is_empty().then_some("json"),
            stream: false,
            options: OllamaChatOptions {
                temperature: self.temperature,
            },
        }
    }

    fn map_send_error(&self, e: reqwest::Error) -> AnalysisError {
        if e.is_connect() {
            AnalysisError::OllamaConnection(self.base_url.clone())
        } else if e.is_timeout() {
            AnalysisError::HttpClient(format!("Request timed out after {}s", self.timeout_secs))
        } else {
            AnalysisError::HttpClient(e.to_string())
        }
    }
}

/// Request body for Ollama /api/chat
#[derive(Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "no_tools")]
    tools: &'a [ToolDefinition],
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'static str>,
    stream: bool,
    options: OllamaChatOptions,
}

fn no_tools(tools: &&[ToolDefinition]) -> bool {
    tools.is_empty()
}

#[derive(Serialize)]
struct OllamaChatOptions {
    temperature: f32,
}

/// Response body from Ollama /api/chat (non-streaming)
#[derive(Deserialize)]
struct OllamaChatResponse {
    message: ChatMessage,
}

/// Response body from Ollama /api/tags
#[derive(Deserialize)]
struct OllamaTagsResponse {
    models: Vec<OllamaModel>,
}

#[derive(Deserialize)]
struct OllamaModel {
    name: String,
}

impl ChatModel for OllamaChatClient {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
    ) -> Result<ChatMessage, AnalysisError> {
        let url = format!("{}/api/chat", self.base_url);
        let body = self.chat_request(messages, tools);

        tracing::debug!(
            model = %self.model,
            messages = messages.len(),
            tools = tools.len(),
            "Sending chat request to Ollama"
        );

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::OllamaError {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::ResponseParsing(e.to_string()))?;

        Ok(parsed.message)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
