//! Shared application state

use std::sync::Arc;

use scholarbot_agent::{AgentConfig, ScholarshipAgent};
use scholarbot_config::Settings;
use scholarbot_engine::{MatchEngine, ScholarshipStore};
use scholarbot_llm::LlmBackend;

use crate::submissions::{InMemorySubmissionStore, SubmissionStore};

/// State shared by all request handlers.
///
/// The dataset store is loaded once at startup and immutable afterwards;
/// everything here is cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub engine: MatchEngine,
    pub agent: Arc<ScholarshipAgent>,
    pub submissions: Arc<dyn SubmissionStore>,
}

impl AppState {
    /// Assemble the state from loaded collaborators.
    pub fn new(
        settings: Settings,
        store: Arc<ScholarshipStore>,
        llm: Arc<dyn LlmBackend>,
    ) -> Self {
        let engine = MatchEngine::new(store);
        let agent = Arc::new(ScholarshipAgent::new(
            engine.clone(),
            llm,
            AgentConfig::default(),
        ));

        Self {
            settings: Arc::new(settings),
            engine,
            agent,
            submissions: Arc::new(InMemorySubmissionStore::new()),
        }
    }

    /// Replace the submission store (tests, alternative backends).
    pub fn with_submission_store(mut self, submissions: Arc<dyn SubmissionStore>) -> Self {
        self.submissions = submissions;
        self
    }
}
