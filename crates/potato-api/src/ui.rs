//! Embedded chat page.
//!
//! A single self-contained HTML file (inline CSS and JavaScript) embedded at
//! compile time via `include_str!` and served from `GET /`. It talks to
//! `/api/chat` and `/api/reset` with a per-tab session id.

/// The complete chat page HTML.
pub const CHAT_HTML: &str = include_str!("../assets/index.html");
