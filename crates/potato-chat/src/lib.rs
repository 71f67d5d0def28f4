//! Conversational core: search-augmented turns over per-session history.
//!
//! Decides when a message needs web context, fuses search results into the
//! outgoing turn, and keeps one conversation per client-chosen session id.

pub mod augment;
pub mod error;
pub mod orchestrator;
pub mod session;
pub mod trigger;
pub mod types;

pub use augment::Turn;
pub use error::ChatError;
pub use orchestrator::ChatOrchestrator;
pub use session::{InMemorySessionStore, SessionStore, SharedConversation};
pub use trigger::{KeywordTrigger, SearchTrigger};
pub use types::ChatReply;
