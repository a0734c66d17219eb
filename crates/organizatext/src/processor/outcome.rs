use crate::entities::Entity;
use crate::patterns::PiiType;
use crate::{OrganizatextError, Result};
use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Analysis record of one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub file_name: String,
    pub file_size: u64,
    pub urls: Vec<String>,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    /// Top RAKE phrases, best first.
    pub keywords: Vec<String>,
    pub entities: Vec<Entity>,
    /// Keywords followed by entity values, capped.
    pub tags: Vec<String>,
    #[serde(rename = "detectado_PII")]
    pub pii_detected: bool,
    pub pii_types: Vec<PiiType>,
    pub word_count: usize,
    pub char_count: usize,
    pub processed_at: DateTime<Utc>,
}

/// Result of processing one file.
///
/// Serializes as `{"success": true, "data": {...}}` or
/// `{"success": false, "error": "...", "fileName": "..."}`.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessOutcome {
    Processed(Box<FileRecord>),
    Failed { error: String, file_name: String },
}

impl ProcessOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProcessOutcome::Processed(_))
    }

    pub fn file_name(&self) -> &str {
        match self {
            ProcessOutcome::Processed(record) => &record.file_name,
            ProcessOutcome::Failed { file_name, .. } => file_name,
        }
    }

    /// Convert into a `Result`, mapping failures to [`OrganizatextError::JobFailed`].
    pub fn into_result(self) -> Result<FileRecord> {
        match self {
            ProcessOutcome::Processed(record) => Ok(*record),
            ProcessOutcome::Failed { error, file_name } => Err(OrganizatextError::JobFailed {
                file_name,
                message: error,
            }),
        }
    }
}

impl Serialize for ProcessOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ProcessOutcome::Processed(record) => {
                let mut state = serializer.serialize_struct("ProcessOutcome", 2)?;
                state.serialize_field("success", &true)?;
                state.serialize_field("data", record)?;
                state.end()
            }
            ProcessOutcome::Failed { error, file_name } => {
                let mut state = serializer.serialize_struct("ProcessOutcome", 3)?;
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
                state.serialize_field("fileName", file_name)?;
                state.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_record() -> FileRecord {
        FileRecord {
            file_name: "a.txt".to_string(),
            file_size: 3,
            urls: vec![],
            emails: vec!["ana@example.com".to_string()],
            phones: vec![],
            keywords: vec!["acta".to_string()],
            entities: vec![],
            tags: vec!["acta".to_string()],
            pii_detected: true,
            pii_types: vec![PiiType::Emails],
            word_count: 1,
            char_count: 3,
            processed_at: DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z").unwrap().with_timezone(&Utc),
        }
    }

    #[test]
    fn test_success_shape() {
        let value = serde_json::to_value(ProcessOutcome::Processed(Box::new(sample_record()))).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["fileName"], "a.txt");
        assert_eq!(value["data"]["detectado_PII"], true);
        assert_eq!(value["data"]["piiTypes"], json!(["emails"]));
        assert_eq!(value["data"]["wordCount"], 1);
        assert_eq!(value["data"]["processedAt"], "2024-05-01T10:00:00Z");
    }

    #[test]
    fn test_failure_shape() {
        let outcome = ProcessOutcome::Failed {
            error: "boom".to_string(),
            file_name: "b.txt".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"success": false, "error": "boom", "fileName": "b.txt"})
        );
        assert!(!outcome.is_success());
        assert_eq!(outcome.file_name(), "b.txt");
        assert!(matches!(outcome.into_result(), Err(OrganizatextError::JobFailed { .. })));
    }

    #[test]
    fn test_record_roundtrips_through_json() {
        let record = sample_record();
        let json = serde_json::to_string(&record).unwrap();
        let back: FileRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
