//! Workspace-level error type
//!
//! Each crate defines its own thiserror enum and converts into this
//! aggregate at the boundary.

use thiserror::Error;

/// Top-level error
#[derive(Error, Debug)]
pub enum Error {
    #[error("Engine error: {0}")]
    Engine(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Agent error: {0}")]
    Agent(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result alias
pub type Result<T> = std::result::Result<T, Error>;
