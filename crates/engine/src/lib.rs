//! Scholarship matching engine
//!
//! Features:
//! - Immutable in-memory dataset store with CSV loading
//! - Fail-open field normalizers for income/percentage encodings
//! - Composable criteria filters built from a student profile
//! - Multi-field substring query matching with name deduplication
//! - Keyword relevance gate for incoming questions
//! - Dataset-wide group-by statistics

pub mod filter;
pub mod loader;
pub mod matcher;
pub mod normalize;
pub mod relevance;
pub mod stats;
pub mod store;

pub use filter::{CriteriaFilter, CriteriaSet, EducationBucket};
pub use loader::{load_dataset, read_dataset};
pub use matcher::{MatchEngine, MAX_MATCHES};
pub use relevance::{RelevanceGate, DOMAIN_KEYWORDS};
pub use stats::{dataset_statistics, DatasetStatistics};
pub use store::ScholarshipStore;

use thiserror::Error;

/// Engine errors
///
/// These only arise while loading the dataset at startup. Matching itself
/// never fails: unparseable values widen results and internal faults
/// degrade to an empty match list at the engine boundary.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<EngineError> for scholarbot_core::Error {
    fn from(err: EngineError) -> Self {
        scholarbot_core::Error::Engine(err.to_string())
    }
}
