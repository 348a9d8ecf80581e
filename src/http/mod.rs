//! Read-only HTTP API for observing the running session
//!
//! - GET /health - Health check
//! - GET /session/status - Session statistics
//! - GET /session/transcript - Accumulated transcript

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
