use serde::Serialize;

/// Successful outcome of one chat turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    /// Generated reply text.
    pub response: String,
    /// True only when a search ran and returned at least one result.
    pub searched: bool,
}
