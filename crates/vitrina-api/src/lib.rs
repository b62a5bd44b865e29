//! Vitrina API Library
//!
//! This crate provides the HTTP upload endpoint, request-body transports,
//! and application setup.

// Module declarations
mod api_doc;
mod handlers;
pub mod setup;
mod telemetry;
pub mod transport;

// Public modules
pub mod error;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
