//! Error types for language model calls.

/// Errors from the generation service.
///
/// The display text is what callers see in a failed chat response, so the
/// provider's own message is kept verbatim where one exists.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),
    #[error("generation request failed: {0}")]
    Request(String),
    #[error("generation service returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("prompt blocked by the generation service: {0}")]
    Blocked(String),
    #[error("generation service returned no text")]
    EmptyResponse,
    #[error("invalid response from generation service: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        LlmError::Request(err.to_string())
    }
}
