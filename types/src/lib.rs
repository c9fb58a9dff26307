//! Shared types for the tally summation service.
//!
//! This crate contains the request and response bodies exchanged over the
//! HTTP API, kept apart from the backend so clients can depend on them alone.

/// Default port for the tally backend server.
pub const DEFAULT_PORT: u16 = 8000;

/// The `status` value carried by every successful response body.
pub const SUCCESS_STATUS: u16 = 200;

pub mod api;

// Re-export commonly used types
pub use api::{Entry, ErrorResponse, SessionResponse, SumRequest, SumResponse};
