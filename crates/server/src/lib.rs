//! Scholarship recommendation server
//!
//! Provides the HTTP endpoints for the chat frontend: chat turns, student
//! info submission, dataset statistics, and health checks.

pub mod http;
pub mod state;
pub mod submissions;

pub use http::create_router;
pub use state::AppState;
pub use submissions::{InMemorySubmissionStore, StudentSubmission, SubmissionStore};

use thiserror::Error;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ServerError> for scholarbot_core::Error {
    fn from(err: ServerError) -> Self {
        scholarbot_core::Error::Server(err.to_string())
    }
}
