//! Error types for the conversational core.

use potato_llm::LlmError;

/// Errors from handling a chat turn.
///
/// Search failures are absent on purpose: they degrade to "no results"
/// inside the search client.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("empty message")]
    EmptyMessage,
    #[error("session store error: {0}")]
    Session(String),
    #[error("{0}")]
    Generation(#[from] LlmError),
}

impl ChatError {
    /// Whether the caller sent something invalid, as opposed to an internal
    /// failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ChatError::EmptyMessage)
    }
}
