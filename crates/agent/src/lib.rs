//! Chat orchestration for scholarship recommendations
//!
//! Wires the pieces together for one chat turn: relevance gate, matching
//! engine, prompt construction, LLM call, and the fixed markdown wrapper
//! around the completion.

pub mod agent;
pub mod response;

pub use agent::{AgentConfig, ChatOutcome, ScholarshipAgent};
pub use response::{format_recommendation, off_topic_guidance};

use thiserror::Error;

/// Agent errors
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("LLM error: {0}")]
    Llm(#[from] scholarbot_llm::LlmError),

    #[error("Incomplete response from model ({0} chars)")]
    IncompleteResponse(usize),
}

impl From<AgentError> for scholarbot_core::Error {
    fn from(err: AgentError) -> Self {
        scholarbot_core::Error::Agent(err.to_string())
    }
}
