//! Question server module.
//!
//! Provides the HTTP API for drawing and adding questions.

mod error;
mod handlers;
mod middleware;
mod server;
mod state;

pub use error::ApiError;
pub use server::{build_routes, run};
pub use state::AppState;
