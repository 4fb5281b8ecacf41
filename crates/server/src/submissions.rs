//! Student submission storage
//!
//! Stores submitted student records and hands back an identifier. The
//! trait is the seam where a real document database would sit; the
//! in-memory implementation is the default backend and keeps submissions
//! for the process lifetime only.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Local;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::ServerError;

/// A stored student record: the submitted fields plus server-side
/// timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentSubmission {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    pub timestamp: String,
    pub submission_date: String,
}

impl StudentSubmission {
    /// Stamp a validated submission with the current time.
    pub fn new(fields: Map<String, Value>) -> Self {
        let now = Local::now();
        Self {
            fields,
            timestamp: now.to_rfc3339(),
            submission_date: now.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Submission store trait for pluggable backends
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Store a submission, returning its document id
    async fn store(&self, submission: StudentSubmission) -> Result<String, ServerError>;

    /// Fetch a submission by id
    async fn get(&self, id: &str) -> Result<Option<StudentSubmission>, ServerError>;

    /// Number of stored submissions
    async fn count(&self) -> usize;
}

/// In-memory submission store (default)
#[derive(Default)]
pub struct InMemorySubmissionStore {
    entries: RwLock<HashMap<String, StudentSubmission>>,
}

impl InMemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubmissionStore for InMemorySubmissionStore {
    async fn store(&self, submission: StudentSubmission) -> Result<String, ServerError> {
        let id = Uuid::new_v4().to_string();
        self.entries.write().insert(id.clone(), submission);
        Ok(id)
    }

    async fn get(&self, id: &str) -> Result<Option<StudentSubmission>, ServerError> {
        Ok(self.entries.read().get(id).cloned())
    }

    async fn count(&self) -> usize {
        self.entries.read().len()
    }
}
