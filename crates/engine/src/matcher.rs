//! Query matching engine
//!
//! The public entry point of the core: filters the dataset against a
//! student profile, optionally searches the candidates with a free-text
//! query, and returns at most [`MAX_MATCHES`] records. The method never
//! fails; an internal fault degrades to an empty match list, because
//! "no matches found" is a valid, user-displayable outcome downstream.

use std::collections::HashSet;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use scholarbot_core::{ScholarshipRecord, StudentProfile};

use crate::filter::CriteriaSet;
use crate::store::ScholarshipStore;

/// Result cap for every match list
pub const MAX_MATCHES: usize = 10;

/// The scholarship matching engine.
///
/// Holds a shared read-only dataset store; every call computes its result
/// from an immutable snapshot, so the engine is safe to share across
/// concurrent requests without locking.
#[derive(Clone)]
pub struct MatchEngine {
    store: Arc<ScholarshipStore>,
}

impl MatchEngine {
    /// Create an engine over a loaded dataset.
    pub fn new(store: Arc<ScholarshipStore>) -> Self {
        Self { store }
    }

    /// The underlying dataset store
    pub fn store(&self) -> &ScholarshipStore {
        &self.store
    }

    /// Find scholarships matching the profile and optional query.
    ///
    /// Never raises: any fault inside filtering or matching is caught at
    /// this boundary, logged for operators, and converted to an empty
    /// list. Blank queries are the "no text search" case, not an error.
    pub fn find_matches(
        &self,
        profile: &StudentProfile,
        query: Option<&str>,
    ) -> Vec<ScholarshipRecord> {
        let outcome = catch_unwind(AssertUnwindSafe(|| self.find_matches_inner(profile, query)));

        match outcome {
            Ok(matches) => {
                tracing::info!("Found {} matching scholarships", matches.len());
                matches
            }
            Err(_) => {
                tracing::error!("Error finding scholarships, returning empty match list");
                Vec::new()
            }
        }
    }

    fn find_matches_inner(
        &self,
        profile: &StudentProfile,
        query: Option<&str>,
    ) -> Vec<ScholarshipRecord> {
        let criteria = CriteriaSet::from_profile(profile);
        tracing::debug!(filters = criteria.len(), "Built criteria set");

        let candidates: Vec<&ScholarshipRecord> = self
            .store
            .iter()
            .filter(|record| criteria.matches(record))
            .collect();

        let query = query.map(str::trim).filter(|q| !q.is_empty());
        let mut matches = match query {
            Some(query) => search_candidates(&candidates, query),
            None => candidates.into_iter().cloned().collect(),
        };

        matches.truncate(MAX_MATCHES);
        matches
    }
}

/// Search the filtered candidates across three text fields in fixed
/// priority order (name, education qualification, community), collecting
/// substring hits per field and deduplicating by scholarship name so each
/// record keeps the position of its first (highest-priority) hit.
fn search_candidates(candidates: &[&ScholarshipRecord], query: &str) -> Vec<ScholarshipRecord> {
    let query = query.to_lowercase();
    let field_passes: [fn(&ScholarshipRecord) -> &str; 3] = [
        |r| r.name.as_str(),
        |r| r.education_qualification.as_str(),
        |r| r.community.as_str(),
    ];

    let mut seen: HashSet<String> = HashSet::new();
    let mut matches = Vec::new();

    for field in field_passes {
        for record in candidates {
            if field(record).to_lowercase().contains(&query) && seen.insert(record.name.clone()) {
                matches.push((*record).clone());
            }
        }
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile(value: serde_json::Value) -> StudentProfile {
        serde_json::from_value(value).unwrap()
    }

    fn fixture_engine() -> MatchEngine {
        let records = vec![
            ScholarshipRecord::new("National Merit Award", "Undergraduate, UG", "General")
                .with_income("Upto 8L")
                .with_annual_percentage("60-75"),
            ScholarshipRecord::new("State Minority Grant", "12, High School", "OBC")
                .with_income("Upto 2L")
                .with_annual_percentage("70-90"),
            ScholarshipRecord::new("Postgraduate Research Fellowship", "Postgraduate, PG", "SC")
                .with_income("")
                .with_annual_percentage(""),
            ScholarshipRecord::new("Girls Education Fund", "Undergraduate, Bachelor", "General")
                .with_income("N/A")
                .with_annual_percentage("50-60"),
        ];
        MatchEngine::new(Arc::new(ScholarshipStore::new(records)))
    }

    fn names(matches: &[ScholarshipRecord]) -> Vec<&str> {
        matches.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_no_filters_returns_store_in_order() {
        let engine = fixture_engine();
        let matches = engine.find_matches(&profile(json!({})), None);

        assert_eq!(
            names(&matches),
            vec![
                "National Merit Award",
                "State Minority Grant",
                "Postgraduate Research Fellowship",
                "Girls Education Fund",
            ]
        );
    }

    #[test]
    fn test_criteria_narrow_candidates() {
        let engine = fixture_engine();
        let matches = engine.find_matches(
            &profile(json!({
                "educationLevel": "Undergraduate",
                "income": 250000,
                "percentage": 65,
            })),
            None,
        );

        // State Minority Grant: wrong level, income cap 2L exceeded, 70 min.
        // Girls Education Fund: malformed income is unbounded, passes.
        assert_eq!(names(&matches), vec!["National Merit Award", "Girls Education Fund"]);
    }

    #[test]
    fn test_query_matches_across_fields_in_priority_order() {
        let engine = fixture_engine();
        // "postgraduate" hits one record by name and the same one again in
        // the education field; it must appear once, at its name-pass slot.
        let matches = engine.find_matches(&profile(json!({})), Some("postgraduate"));
        assert_eq!(names(&matches), vec!["Postgraduate Research Fellowship"]);
    }

    #[test]
    fn test_query_field_priority_and_dedup() {
        let engine = fixture_engine();
        // "general" only occurs in the community field of two records
        let matches = engine.find_matches(&profile(json!({})), Some("general"));
        assert_eq!(
            names(&matches),
            vec!["National Merit Award", "Girls Education Fund"]
        );
    }

    #[test]
    fn test_blank_query_is_no_text_search() {
        let engine = fixture_engine();
        let with_none = engine.find_matches(&profile(json!({})), None);
        let with_blank = engine.find_matches(&profile(json!({})), Some("   "));
        assert_eq!(names(&with_none), names(&with_blank));
    }

    #[test]
    fn test_result_cap() {
        let records: Vec<ScholarshipRecord> = (0..25)
            .map(|i| ScholarshipRecord::new(format!("Scholarship {i}"), "UG", "General"))
            .collect();
        let engine = MatchEngine::new(Arc::new(ScholarshipStore::new(records)));

        assert_eq!(engine.find_matches(&profile(json!({})), None).len(), MAX_MATCHES);
        assert_eq!(
            engine
                .find_matches(&profile(json!({})), Some("scholarship"))
                .len(),
            MAX_MATCHES
        );
    }

    #[test]
    fn test_matching_is_idempotent() {
        let engine = fixture_engine();
        let p = profile(json!({ "category": "OBC", "percentage": 75 }));

        let first = engine.find_matches(&p, Some("grant"));
        let second = engine.find_matches(&p, Some("grant"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_query_hit_returns_empty() {
        let engine = fixture_engine();
        let matches = engine.find_matches(&profile(json!({})), Some("zzz-no-such-term"));
        assert!(matches.is_empty());
    }
}
