//! Hosted language model access.
//!
//! [`LanguageModel`] is the generation capability, [`Conversation`] keeps the
//! role-tagged history for one session and [`GeminiClient`] talks to the
//! Generative Language REST API.

pub mod conversation;
pub mod error;
pub mod gemini;
pub mod types;

pub use conversation::{Conversation, LanguageModel};
pub use error::LlmError;
pub use gemini::GeminiClient;
pub use types::{ChatMessage, Role};
