//! Potato API crate - axum HTTP server and route handlers.
//!
//! Exposes the chat and reset endpoints, the embedded chat page and a
//! health check. All chat logic lives in `potato-chat`; this crate only
//! translates between JSON and the orchestrator.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod ui;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
