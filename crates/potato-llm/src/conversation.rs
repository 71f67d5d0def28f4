//! Generation capability and per-session conversation state.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::LlmError;
use crate::types::{ChatMessage, Role};

/// A hosted text generation model.
///
/// The system instruction and model id are fixed when the implementation is
/// constructed; each call only carries the conversation so far.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generate a reply to `turn`, given the prior `history` (oldest first,
    /// not including `turn`).
    async fn generate(&self, history: &[ChatMessage], turn: &str) -> Result<String, LlmError>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}

/// Conversation state for one session.
///
/// `send` appends the user turn, asks the model for a reply and appends the
/// reply. It takes `&mut self`, so callers sharing a conversation must
/// serialize access to it.
pub struct Conversation {
    model: Arc<dyn LanguageModel>,
    history: Vec<ChatMessage>,
}

impl Conversation {
    /// Start a conversation seeded with `history`.
    pub fn start(model: Arc<dyn LanguageModel>, history: Vec<ChatMessage>) -> Self {
        Self { model, history }
    }

    /// Send one user turn and return the generated reply.
    ///
    /// The user turn is recorded before generation. If generation fails it
    /// stays in the history without a reply.
    pub async fn send(&mut self, text: &str) -> Result<String, LlmError> {
        let prior = self.history.len();
        self.history.push(ChatMessage::user(text));

        let reply = self.model.generate(&self.history[..prior], text).await?;

        self.history.push(ChatMessage::model(reply.clone()));
        Ok(reply)
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Number of user turns recorded so far.
    pub fn turn_count(&self) -> usize {
        self.history.iter().filter(|m| m.role == Role::User).count()
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }
}

impl std::fmt::Debug for Conversation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Conversation")
            .field("model", &self.model.model_name())
            .field("messages", &self.history.len())
            .finish()
    }
}
