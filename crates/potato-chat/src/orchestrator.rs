//! Chat orchestrator: central coordinator wiring trigger, search, and sessions.
//!
//! For each message it picks the session, decides whether to search, fuses
//! any results into the turn and hands the turn to the session's
//! conversation for generation.

use std::sync::Arc;

use potato_core::config::ChatConfig;
use potato_search::{SearchOutcome, SearchProvider};

use crate::augment::Turn;
use crate::error::ChatError;
use crate::session::SessionStore;
use crate::trigger::SearchTrigger;
use crate::types::ChatReply;

/// Central chat orchestrator.
pub struct ChatOrchestrator {
    trigger: Arc<dyn SearchTrigger>,
    search: Arc<dyn SearchProvider>,
    sessions: Arc<dyn SessionStore>,
    default_session_id: String,
}

impl ChatOrchestrator {
    pub fn new(
        trigger: Arc<dyn SearchTrigger>,
        search: Arc<dyn SearchProvider>,
        sessions: Arc<dyn SessionStore>,
        config: &ChatConfig,
    ) -> Self {
        Self {
            trigger,
            search,
            sessions,
            default_session_id: config.default_session_id.clone(),
        }
    }

    /// Handle one incoming chat message.
    ///
    /// A missing or empty message is rejected before any session or search
    /// work happens. The session's lock is held from lookup until the reply
    /// is recorded, so turns within one session never interleave.
    pub async fn handle(
        &self,
        session_id: Option<&str>,
        message: Option<&str>,
    ) -> Result<ChatReply, ChatError> {
        let message = match message {
            Some(m) if !m.is_empty() => m,
            _ => return Err(ChatError::EmptyMessage),
        };
        let sid = self.resolve_session_id(session_id);

        let conversation = self.sessions.get_or_create(sid).await?;
        let mut conversation = conversation.lock().await;

        let outcome = if self.trigger.needs_search(message) {
            tracing::debug!(session_id = %sid, "Message needs search context");
            Some(self.search.search(message).await)
        } else {
            None
        };

        let turn = match &outcome {
            Some(SearchOutcome::Results(results)) => Turn::with_results(message, results),
            Some(SearchOutcome::NoResults) | None => Turn::plain(message),
        };
        let searched = turn.is_augmented();

        tracing::info!(
            session_id = %sid,
            search_attempted = outcome.is_some(),
            search_hit = outcome.as_ref().is_some_and(|o| o.has_results()),
            results = outcome.as_ref().map(|o| o.results().len()).unwrap_or(0),
            "Sending turn to model"
        );

        let response = match conversation.send(&turn.augmented).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(session_id = %sid, error = %e, "Generation failed");
                return Err(e.into());
            }
        };

        Ok(ChatReply { response, searched })
    }

    /// Forget the conversation for a session. Resetting an unknown session
    /// succeeds and reports `false`.
    pub async fn reset(&self, session_id: Option<&str>) -> Result<bool, ChatError> {
        let sid = self.resolve_session_id(session_id);
        self.sessions.reset(sid).await
    }

    pub async fn active_sessions(&self) -> usize {
        self.sessions.active_sessions().await
    }

    pub fn default_session_id(&self) -> &str {
        &self.default_session_id
    }

    fn resolve_session_id<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested.unwrap_or(&self.default_session_id)
    }
}

// =============================================================================
// Tests
// =============================================================================
