use thiserror::Error;

/// Top-level error type for the Potato backend.
///
/// Covers failures that happen while the process is being set up: loading
/// configuration, reading credentials, binding the listener. Request-time
/// failures are modeled by the subsystem crates (`ChatError`, `LlmError`)
/// and never reach this type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PotatoError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing credential: environment variable {0} is not set")]
    MissingCredential(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for PotatoError {
    fn from(err: toml::de::Error) -> Self {
        PotatoError::Config(err.to_string())
    }
}

/// A specialized `Result` type for Potato startup operations.
pub type Result<T> = std::result::Result<T, PotatoError>;
