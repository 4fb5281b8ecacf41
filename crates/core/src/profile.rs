//! Student profile type
//!
//! External input submitted by the frontend. The profile is transient:
//! created per request, consumed by the matching engine and the prompt
//! builder, and never stored by the core.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Student profile as submitted by the chat frontend.
///
/// Field names follow the frontend's camelCase JSON. `income` and
/// `percentage` arrive as either JSON numbers or numeric strings, so they
/// are kept raw and interpreted through the accessor methods; a value that
/// does not parse as a finite number simply yields `None`, which the
/// criteria filter treats as "filter not constructible" (fail-open).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub age: Option<Value>,
    #[serde(default)]
    pub education_level: String,
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub income: Option<Value>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub percentage: Option<Value>,
    #[serde(default)]
    pub aadhar: String,
    #[serde(default)]
    pub email: String,
}

impl StudentProfile {
    /// Annual income as a finite number, if the submitted value parses
    pub fn income(&self) -> Option<f64> {
        numeric(self.income.as_ref())
    }

    /// Academic percentage as a finite number, if the submitted value parses
    pub fn percentage(&self) -> Option<f64> {
        numeric(self.percentage.as_ref())
    }
}

/// Interpret a JSON number or numeric string as a finite f64.
fn numeric(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_fields() {
        let profile: StudentProfile = serde_json::from_value(serde_json::json!({
            "fullName": "Asha Kumari",
            "educationLevel": "Undergraduate",
            "income": 250000,
            "category": "OBC",
            "state": "Bihar",
            "percentage": "82.5",
        }))
        .unwrap();

        assert_eq!(profile.full_name, "Asha Kumari");
        assert_eq!(profile.education_level, "Undergraduate");
        assert_eq!(profile.income(), Some(250000.0));
        assert_eq!(profile.percentage(), Some(82.5));
    }

    #[test]
    fn test_unparseable_numbers_yield_none() {
        let profile: StudentProfile = serde_json::from_value(serde_json::json!({
            "income": "five lakhs",
            "percentage": { "value": 80 },
        }))
        .unwrap();

        assert_eq!(profile.income(), None);
        assert_eq!(profile.percentage(), None);
    }

    #[test]
    fn test_missing_fields_default() {
        let profile: StudentProfile = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(profile.category.is_empty());
        assert_eq!(profile.income(), None);
    }
}
