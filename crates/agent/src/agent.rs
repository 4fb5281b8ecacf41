//! Scholarship recommendation agent
//!
//! One chat turn: gate the question, look up matching scholarships, build
//! the prompt, call the model, wrap the completion in the recommendation
//! template.

use std::sync::Arc;

use scholarbot_core::StudentProfile;
use scholarbot_engine::{MatchEngine, RelevanceGate};
use scholarbot_llm::{LlmBackend, PromptBuilder};

use crate::response;
use crate::AgentError;

/// Agent configuration
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Completions shorter than this are treated as failed generations
    pub min_response_chars: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            min_response_chars: 20,
        }
    }
}

/// Outcome of one chat turn
#[derive(Debug, Clone, PartialEq)]
pub enum ChatOutcome {
    /// The formatted recommendation message
    Answered(String),
    /// The question failed the relevance gate; carries the scope guidance
    Rejected(String),
}

/// Scholarship recommendation agent
pub struct ScholarshipAgent {
    config: AgentConfig,
    engine: MatchEngine,
    gate: RelevanceGate,
    llm: Arc<dyn LlmBackend>,
}

impl ScholarshipAgent {
    /// Create an agent over a matching engine and an LLM backend.
    pub fn new(engine: MatchEngine, llm: Arc<dyn LlmBackend>, config: AgentConfig) -> Self {
        Self {
            config,
            engine,
            gate: RelevanceGate::new(),
            llm,
        }
    }

    /// The matching engine, for callers that need direct lookups
    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    /// Process one question against a student profile.
    ///
    /// Off-topic questions are rejected without touching the engine or
    /// the model. Model failures surface as errors for the caller to
    /// translate into its own apologetic reply.
    pub async fn process(
        &self,
        profile: &StudentProfile,
        question: &str,
    ) -> Result<ChatOutcome, AgentError> {
        if !self.gate.is_relevant(question) {
            tracing::debug!("Question rejected by relevance gate");
            return Ok(ChatOutcome::Rejected(response::off_topic_guidance()));
        }

        let matches = self.engine.find_matches(profile, Some(question));

        let messages = PromptBuilder::new()
            .system_prompt()
            .with_matches(&matches)
            .question(profile, question)
            .build();

        let result = self.llm.generate(&messages).await?;
        tracing::debug!(
            "LLM generated {} tokens in {}ms",
            result.tokens,
            result.total_time_ms
        );

        let text = result.text.trim();
        if text.len() < self.config.min_response_chars {
            return Err(AgentError::IncompleteResponse(text.len()));
        }

        Ok(ChatOutcome::Answered(response::format_recommendation(
            profile, text,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use scholarbot_core::ScholarshipRecord;
    use scholarbot_engine::ScholarshipStore;
    use scholarbot_llm::{GenerationResult, LlmError, Message};

    struct MockLlm {
        reply: String,
    }

    #[async_trait]
    impl LlmBackend for MockLlm {
        async fn generate(&self, _messages: &[Message]) -> Result<GenerationResult, LlmError> {
            Ok(GenerationResult {
                text: self.reply.clone(),
                tokens: 0,
                total_time_ms: 0,
            })
        }

        async fn is_available(&self) -> bool {
            true
        }

        fn model_name(&self) -> &str {
            "mock-llm"
        }
    }

    fn agent(reply: &str) -> ScholarshipAgent {
        let store = ScholarshipStore::new(vec![ScholarshipRecord::new(
            "Merit Scholarship",
            "Undergraduate, UG",
            "General",
        )]);
        ScholarshipAgent::new(
            MatchEngine::new(Arc::new(store)),
            Arc::new(MockLlm {
                reply: reply.to_string(),
            }),
            AgentConfig::default(),
        )
    }

    fn profile() -> StudentProfile {
        serde_json::from_value(serde_json::json!({
            "educationLevel": "Undergraduate",
            "category": "General",
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_off_topic_rejected_before_llm() {
        let outcome = agent("### 🏆 Merit Scholarship: a long enough reply")
            .process(&profile(), "What is the weather today?")
            .await
            .unwrap();

        match outcome {
            ChatOutcome::Rejected(guidance) => {
                assert!(guidance.contains("education, scholarships"))
            }
            ChatOutcome::Answered(_) => panic!("off-topic question was answered"),
        }
    }

    #[tokio::test]
    async fn test_answered_wraps_template() {
        let outcome = agent("### 🏆 Merit Scholarship: a long enough reply")
            .process(&profile(), "Which scholarship suits my eligibility?")
            .await
            .unwrap();

        match outcome {
            ChatOutcome::Answered(message) => {
                assert!(message.contains("## 🎓 Scholarship Recommendations"));
                assert!(message.contains("Merit Scholarship"));
            }
            ChatOutcome::Rejected(_) => panic!("on-topic question was rejected"),
        }
    }

    #[tokio::test]
    async fn test_short_completion_is_an_error() {
        let err = agent("too short")
            .process(&profile(), "Scholarship eligibility?")
            .await
            .unwrap_err();

        assert!(matches!(err, AgentError::IncompleteResponse(_)));
    }
}
