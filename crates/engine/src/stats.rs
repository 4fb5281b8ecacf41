//! Dataset statistics aggregator
//!
//! Grouped counts over the full store for summary/reporting use. Pure
//! read-only computation, recomputed per call; the store never changes
//! after load so there is nothing to invalidate.

use std::collections::HashMap;

use serde::Serialize;

use crate::store::ScholarshipStore;

/// Total record count plus per-field value counts.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetStatistics {
    pub total: usize,
    pub by_education: HashMap<String, usize>,
    pub by_community: HashMap<String, usize>,
    pub by_religion: HashMap<String, usize>,
    pub by_gender: HashMap<String, usize>,
}

/// Compute statistics over the full dataset.
pub fn dataset_statistics(store: &ScholarshipStore) -> DatasetStatistics {
    DatasetStatistics {
        total: store.len(),
        by_education: count_by(store, |r| r.education_qualification.as_str()),
        by_community: count_by(store, |r| r.community.as_str()),
        by_religion: count_by(store, |r| r.religion.as_str()),
        by_gender: count_by(store, |r| r.gender.as_str()),
    }
}

fn count_by<F>(store: &ScholarshipStore, field: F) -> HashMap<String, usize>
where
    F: Fn(&scholarbot_core::ScholarshipRecord) -> &str,
{
    let mut counts = HashMap::new();
    for record in store.iter() {
        *counts.entry(field(record).to_string()).or_insert(0) += 1;
    }
    counts
}
