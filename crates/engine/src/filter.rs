//! Criteria filters
//!
//! A student profile yields zero or more independently constructible
//! filters, combined with logical AND. A filter that cannot be built from
//! the profile (empty field, non-numeric income) is simply absent: absence
//! widens results. With no filters at all, every record passes.

use scholarbot_core::{ScholarshipRecord, StudentProfile};

use crate::normalize;

/// Coarse education-level groups used to widen education matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationBucket {
    HighSchool,
    Undergraduate,
    Postgraduate,
}

impl EducationBucket {
    /// Map a profile's free-text education level to a bucket by substring
    /// presence (case-insensitive). Unrecognized levels yield no bucket,
    /// and therefore no education filter.
    pub fn from_profile_level(level: &str) -> Option<Self> {
        let level = level.to_lowercase();
        if level.contains("high school") || level.contains("12") {
            Some(Self::HighSchool)
        } else if level.contains("undergraduate") || level.contains("bachelor") {
            Some(Self::Undergraduate)
        } else if level.contains("postgraduate") || level.contains("master") {
            Some(Self::Postgraduate)
        } else {
            None
        }
    }

    /// Substrings matched (case-insensitively) against a record's
    /// education qualification. A record passes if any term occurs.
    pub fn qualification_terms(&self) -> &'static [&'static str] {
        match self {
            Self::HighSchool => &["12", "high school", "secondary"],
            Self::Undergraduate => &["undergraduate", "bachelor", "ug"],
            Self::Postgraduate => &["postgraduate", "master", "pg"],
        }
    }
}

/// A single validated, constructible filter.
#[derive(Debug, Clone, PartialEq)]
pub enum CriteriaFilter {
    /// Record's education qualification must contain a bucket term
    Education(EducationBucket),
    /// Record's community must contain the profile category (lower-cased)
    Category(String),
    /// Record's income ceiling must be at least the student's income
    IncomeCeiling(f64),
    /// Record's minimum percentage must not exceed the student's percentage
    MinimumPercentage(f64),
}

impl CriteriaFilter {
    /// Does this record satisfy the filter?
    ///
    /// Income/percentage ceilings are normalized from the record's raw
    /// text per call; nothing is cached on the shared store.
    pub fn matches(&self, record: &ScholarshipRecord) -> bool {
        match self {
            Self::Education(bucket) => {
                let qualification = record.education_qualification.to_lowercase();
                bucket
                    .qualification_terms()
                    .iter()
                    .any(|term| qualification.contains(term))
            }
            Self::Category(category) => record.community.to_lowercase().contains(category),
            Self::IncomeCeiling(income) => normalize::income_ceiling(&record.income) >= *income,
            Self::MinimumPercentage(percentage) => {
                normalize::minimum_percentage(&record.annual_percentage) <= *percentage
            }
        }
    }
}

/// The AND-composition of all filters constructible from a profile.
#[derive(Debug, Clone, Default)]
pub struct CriteriaSet {
    filters: Vec<CriteriaFilter>,
}

impl CriteriaSet {
    /// Build the filter set for a profile. Each filter activates only if
    /// its profile field is present and interpretable; otherwise it is
    /// skipped and the skip is logged for operators.
    pub fn from_profile(profile: &StudentProfile) -> Self {
        let mut filters = Vec::new();

        if !profile.education_level.is_empty() {
            if let Some(bucket) = EducationBucket::from_profile_level(&profile.education_level) {
                filters.push(CriteriaFilter::Education(bucket));
            }
        }

        if !profile.category.is_empty() {
            filters.push(CriteriaFilter::Category(profile.category.to_lowercase()));
        }

        match profile.income() {
            Some(income) => filters.push(CriteriaFilter::IncomeCeiling(income)),
            None if profile.income.is_some() => {
                tracing::warn!("Invalid income value, skipping income filter");
            }
            None => {}
        }

        match profile.percentage() {
            Some(percentage) => filters.push(CriteriaFilter::MinimumPercentage(percentage)),
            None if profile.percentage.is_some() => {
                tracing::warn!("Invalid percentage value, skipping percentage filter");
            }
            None => {}
        }

        Self { filters }
    }

    /// True if no filter could be constructed
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Number of active filters
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// A record passes if it satisfies every active filter.
    pub fn matches(&self, record: &ScholarshipRecord) -> bool {
        self.filters.iter().all(|f| f.matches(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile(value: serde_json::Value) -> StudentProfile {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_bucket_mapping() {
        assert_eq!(
            EducationBucket::from_profile_level("Class 12"),
            Some(EducationBucket::HighSchool)
        );
        assert_eq!(
            EducationBucket::from_profile_level("Bachelor of Science"),
            Some(EducationBucket::Undergraduate)
        );
        assert_eq!(
            EducationBucket::from_profile_level("Master's degree"),
            Some(EducationBucket::Postgraduate)
        );
        assert_eq!(EducationBucket::from_profile_level("Diploma"), None);
    }

    #[test]
    fn test_education_filter_any_term() {
        let filter = CriteriaFilter::Education(EducationBucket::Undergraduate);
        assert!(filter.matches(&ScholarshipRecord::new("A", "UG students only", "")));
        assert!(filter.matches(&ScholarshipRecord::new("B", "Bachelor degree holders", "")));
        assert!(!filter.matches(&ScholarshipRecord::new("C", "Postgraduate", "")));
    }

    #[test]
    fn test_category_filter_case_insensitive_substring() {
        let filter = CriteriaFilter::Category("obc".to_string());
        assert!(filter.matches(&ScholarshipRecord::new("A", "", "OBC / SC / ST")));
        assert!(!filter.matches(&ScholarshipRecord::new("B", "", "General")));
    }

    #[test]
    fn test_income_filter_boundary() {
        let record = ScholarshipRecord::new("A", "", "").with_income("Upto 2L");

        // Ceiling 200000: income 250000 is over the cap, 150000 is within
        assert!(!CriteriaFilter::IncomeCeiling(250_000.0).matches(&record));
        assert!(CriteriaFilter::IncomeCeiling(150_000.0).matches(&record));
        assert!(CriteriaFilter::IncomeCeiling(200_000.0).matches(&record));
    }

    #[test]
    fn test_income_filter_malformed_record_never_excludes() {
        let record = ScholarshipRecord::new("A", "", "").with_income("N/A");
        assert!(CriteriaFilter::IncomeCeiling(10_000_000.0).matches(&record));
    }

    #[test]
    fn test_percentage_filter_boundary() {
        let record = ScholarshipRecord::new("A", "", "").with_annual_percentage("70-90");

        assert!(!CriteriaFilter::MinimumPercentage(65.0).matches(&record));
        assert!(CriteriaFilter::MinimumPercentage(75.0).matches(&record));
        assert!(CriteriaFilter::MinimumPercentage(70.0).matches(&record));
    }

    #[test]
    fn test_from_profile_builds_all_filters() {
        let set = CriteriaSet::from_profile(&profile(json!({
            "educationLevel": "Undergraduate",
            "category": "SC",
            "income": 150000,
            "percentage": 80,
        })));
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn test_from_profile_skips_unconstructible_filters() {
        let set = CriteriaSet::from_profile(&profile(json!({
            "educationLevel": "Diploma",
            "income": "not a number",
        })));
        // Unrecognized bucket and unparseable income both skipped
        assert!(set.is_empty());
    }

    #[test]
    fn test_empty_set_matches_everything() {
        let set = CriteriaSet::from_profile(&profile(json!({})));
        assert!(set.is_empty());
        assert!(set.matches(&ScholarshipRecord::new("Anything", "", "")));
    }
}
