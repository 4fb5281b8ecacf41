//! Immutable scholarship dataset store
//!
//! Loaded once at startup and shared read-only across requests. Insertion
//! order from the source table is preserved; no operation in the engine
//! mutates the store, so concurrent requests need no locking.

use scholarbot_core::ScholarshipRecord;
use std::collections::BTreeSet;

/// The in-memory scholarship table.
#[derive(Debug, Clone, Default)]
pub struct ScholarshipStore {
    records: Vec<ScholarshipRecord>,
}

impl ScholarshipStore {
    /// Build a store from loaded records, preserving their order.
    pub fn new(records: Vec<ScholarshipRecord>) -> Self {
        Self { records }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the dataset is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, in source order
    pub fn records(&self) -> &[ScholarshipRecord] {
        &self.records
    }

    /// Iterate records in source order
    pub fn iter(&self) -> impl Iterator<Item = &ScholarshipRecord> {
        self.records.iter()
    }

    /// Distinct non-empty values of a column, sorted. Used for the startup
    /// dataset summary log.
    pub fn distinct<F>(&self, field: F) -> Vec<String>
    where
        F: Fn(&ScholarshipRecord) -> &str,
    {
        let values: BTreeSet<&str> = self
            .records
            .iter()
            .map(|r| field(r).trim())
            .filter(|v| !v.is_empty())
            .collect();
        values.into_iter().map(str::to_owned).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_preserves_order() {
        let store = ScholarshipStore::new(vec![
            ScholarshipRecord::new("B", "", ""),
            ScholarshipRecord::new("A", "", ""),
        ]);

        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[0].name, "B");
        assert_eq!(store.records()[1].name, "A");
    }

    #[test]
    fn test_distinct_sorted_and_deduplicated() {
        let store = ScholarshipStore::new(vec![
            ScholarshipRecord::new("A", "", "OBC"),
            ScholarshipRecord::new("B", "", "SC"),
            ScholarshipRecord::new("C", "", "OBC"),
            ScholarshipRecord::new("D", "", "  "),
        ]);

        let communities = store.distinct(|r| r.community.as_str());
        assert_eq!(communities, vec!["OBC".to_string(), "SC".to_string()]);
    }
}
