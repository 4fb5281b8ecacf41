//! Generative model integration
//!
//! Features:
//! - `LlmBackend` trait: prompt in, completion out, or fail
//! - Gemini `generateContent` HTTP backend with retry
//! - Prompt construction for scholarship recommendations

pub mod backend;
pub mod prompt;

pub use backend::{GeminiBackend, GenerationResult, LlmBackend, LlmConfig};
pub use prompt::{Message, PromptBuilder, Role};

use thiserror::Error;

/// LLM errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Generation error: {0}")]
    Generation(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

impl From<LlmError> for scholarbot_core::Error {
    fn from(err: LlmError) -> Self {
        scholarbot_core::Error::Llm(err.to_string())
    }
}
