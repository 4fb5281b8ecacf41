//! CSV dataset loader
//!
//! Reads the scholarship table once at process start. A load failure is
//! the one fatal condition around the engine; after a successful load the
//! store is immutable for the process lifetime.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use scholarbot_core::ScholarshipRecord;

use crate::store::ScholarshipStore;
use crate::EngineError;

/// Load the dataset from a CSV file on disk.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<ScholarshipStore, EngineError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        EngineError::Dataset(format!("Dataset file not found: {}: {e}", path.display()))
    })?;

    tracing::info!("Loading dataset from {}", path.display());
    let store = read_dataset(file)?;
    tracing::info!("Dataset loaded successfully with {} rows", store.len());

    Ok(store)
}

/// Read scholarship records from any CSV source, preserving row order.
/// Missing cells deserialize to empty strings.
pub fn read_dataset(reader: impl Read) -> Result<ScholarshipStore, EngineError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in csv_reader.deserialize::<ScholarshipRecord>() {
        records.push(row?);
    }

    if records.is_empty() {
        return Err(EngineError::Dataset("Dataset contains no records".to_string()));
    }

    Ok(ScholarshipStore::new(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
Name,Education Qualification,Community,Religion,Gender,Income,Annual-Percentage
National Merit Award,\"Undergraduate, UG\",General,Any,Any,Upto 8L,60-75
State Minority Grant,\"12, High School\",OBC,Any,Any,Upto 2L,70-90
Research Fellowship,\"Postgraduate, PG\",SC,Any,Female,,
";

    #[test]
    fn test_read_dataset() {
        let store = read_dataset(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(store.len(), 3);

        let first = &store.records()[0];
        assert_eq!(first.name, "National Merit Award");
        assert_eq!(first.education_qualification, "Undergraduate, UG");
        assert_eq!(first.income, "Upto 8L");

        // Blank trailing cells stay empty, meaning unbounded/no minimum
        let last = &store.records()[2];
        assert!(last.income.is_empty());
        assert!(last.annual_percentage.is_empty());
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let header_only = "Name,Education Qualification,Community,Religion,Gender,Income,Annual-Percentage\n";
        assert!(read_dataset(header_only.as_bytes()).is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(load_dataset("/no/such/dataset.csv").is_err());
    }
}
