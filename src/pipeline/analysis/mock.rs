//! Scripted chat model for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use super::types::{ChatMessage, ChatModel, ToolDefinition};
use super::AnalysisError;

/// One scripted reply.
pub enum MockReply {
    Message(ChatMessage),
    Fail(String),
}

/// What the model was asked on one turn.
#[derive(Debug, Clone)]
pub struct RecordedTurn {
    pub messages: Vec<ChatMessage>,
    pub tools: Vec<ToolDefinition>,
}

/// Replays scripted replies in order and records every request.
/// Once the script runs out, every further turn fails.
pub struct MockChatModel {
    replies: Mutex<VecDeque<MockReply>>,
    turns: Mutex<Vec<RecordedTurn>>,
}

impl MockChatModel {
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            turns: Mutex::new(Vec::new()),
        }
    }

    /// A model that answers once with the given content.
    pub fn answering(content: &str) -> Self {
        Self::new(vec![MockReply::Message(ChatMessage::assistant(content))])
    }

    pub fn failing(reason: &str) -> Self {
        Self::new(vec![MockReply::Fail(reason.to_string())])
    }

    pub fn turns(&self) -> Vec<RecordedTurn> {
        self.turns.lock().unwrap().clone()
    }
}

impl ChatModel for MockChatModel {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
    ) -> Result<ChatMessage, AnalysisError> {
        self.turns.lock().unwrap().push(RecordedTurn {
            messages: messages.to_vec(),
            tools: tools.to_vec(),
        });
        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(MockReply::Message(message)) => Ok(message),
            Some(MockReply::Fail(reason)) => Err(AnalysisError::HttpClient(reason)),
            None => Err(AnalysisError::OllamaConnection("mock script exhausted".into())),
        }
    }

    fn model_name(&self) -> &str {
        "mock-medgemma"
    }
}
