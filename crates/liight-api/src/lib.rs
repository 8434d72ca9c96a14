//! Liight API Library
//!
//! HTTP handlers, application state and server setup for the studio backend.

pub mod constants;
pub mod error;
mod handlers;
pub mod setup;
pub mod state;
mod telemetry;
mod utils;

pub use error::HttpAppError;
pub use state::AppState;
