//! Session store: one conversation per client-chosen session id.
//!
//! Conversations are created lazily on first use and live until an explicit
//! reset or process exit. There is no expiry, so many distinct long-lived
//! ids grow memory without bound.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use potato_llm::{Conversation, LanguageModel};

use crate::error::ChatError;

/// A conversation shared between the store and in-flight requests.
///
/// The async mutex serializes turns within one session; holders keep it for
/// the whole append-and-generate sequence.
pub type SharedConversation = Arc<tokio::sync::Mutex<Conversation>>;

/// Keyed storage of conversations.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Return the conversation for `session_id`, starting a fresh one with an
    /// empty history if none exists.
    async fn get_or_create(&self, session_id: &str) -> Result<SharedConversation, ChatError>;

    /// Drop the conversation for `session_id`. Returns whether one existed.
    async fn reset(&self, session_id: &str) -> Result<bool, ChatError>;

    /// Number of live sessions.
    async fn active_sessions(&self) -> usize;
}

/// Process-local session store backed by a `HashMap`.
///
/// The map lock is only held for lookups and inserts, never across an
/// await, so sessions do not block each other.
pub struct InMemorySessionStore {
    model: Arc<dyn LanguageModel>,
    sessions: Mutex<HashMap<String, SharedConversation>>,
}

impl InMemorySessionStore {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self {
            model,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions
            .lock()
            .map(|s| s.contains_key(session_id))
            .unwrap_or(false)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_or_create(&self, session_id: &str) -> Result<SharedConversation, ChatError> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|e| ChatError::Session(format!("session lock poisoned: {}", e)))?;

        if let Some(existing) = sessions.get(session_id) {
            return Ok(Arc::clone(existing));
        }

        let conversation = Conversation::start(Arc::clone(&self.model), Vec::new());
        tracing::info!(
            session_id = %session_id,
            model = %conversation.model_name(),
            "Started new conversation"
        );
        let conversation = Arc::new(tokio::sync::Mutex::new(conversation));
        sessions.insert(session_id.to_string(), Arc::clone(&conversation));
        Ok(conversation)
    }

    async fn reset(&self, session_id: &str) -> Result<bool, ChatError> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|e| ChatError::Session(format!("session lock poisoned: {}", e)))?;
        let removed = sessions.remove(session_id).is_some();
        tracing::info!(session_id = %session_id, removed, "Session reset");
        Ok(removed)
    }

    async fn active_sessions(&self) -> usize {
        match self.sessions.lock() {
            Ok(s) => s.len(),
            Err(e) => {
                tracing::error!("Session lock poisoned: {}", e);
                0
            }
        }
    }
}
