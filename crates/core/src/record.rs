//! Scholarship record type
//!
//! One row of the scholarship dataset. All fields are kept as the raw
//! free-form strings from the source table; numeric interpretations
//! (income ceiling, minimum percentage) are computed on demand by the
//! engine and never written back.

use serde::{Deserialize, Serialize};

/// A single scholarship from the dataset.
///
/// `name` doubles as the deduplication key during query matching. The
/// dataset is assumed not to contain two distinct scholarships with the
/// same name; if it does, they collapse into one match. This is a
/// documented limitation of the source data, not enforced here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ScholarshipRecord {
    /// Human-readable scholarship name
    #[serde(rename = "Name", default)]
    pub name: String,

    /// Eligible education levels, free text (may list several terms)
    #[serde(rename = "Education Qualification", default)]
    pub education_qualification: String,

    /// Category/reservation class, e.g. "OBC", "SC", "General"
    #[serde(rename = "Community", default)]
    pub community: String,

    /// Used only for aggregate statistics
    #[serde(rename = "Religion", default)]
    pub religion: String,

    /// Used only for aggregate statistics
    #[serde(rename = "Gender", default)]
    pub gender: String,

    /// Income ceiling encoding, e.g. "Upto 5L"; blank means no ceiling
    #[serde(rename = "Income", default)]
    pub income: String,

    /// Percentage range encoding, e.g. "60-75"; blank means no minimum
    #[serde(rename = "Annual-Percentage", default)]
    pub annual_percentage: String,
}

impl ScholarshipRecord {
    /// Create a record with just the fields that drive matching.
    /// Remaining fields default to empty. Intended for tests and fixtures.
    pub fn new(
        name: impl Into<String>,
        education_qualification: impl Into<String>,
        community: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            education_qualification: education_qualification.into(),
            community: community.into(),
            ..Default::default()
        }
    }

    /// Set the raw income ceiling string
    pub fn with_income(mut self, income: impl Into<String>) -> Self {
        self.income = income.into();
        self
    }

    /// Set the raw annual percentage string
    pub fn with_annual_percentage(mut self, annual_percentage: impl Into<String>) -> Self {
        self.annual_percentage = annual_percentage.into();
        self
    }

    /// Set the religion field
    pub fn with_religion(mut self, religion: impl Into<String>) -> Self {
        self.religion = religion.into();
        self
    }

    /// Set the gender field
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = gender.into();
        self
    }
}
