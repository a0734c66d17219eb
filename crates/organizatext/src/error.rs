//! Error types for Organizatext.
//!
//! All fallible operations return [`OrganizatextError`] through the crate-wide
//! [`Result`] alias.
//!
//! # Error Handling Philosophy
//!
//! **System errors bubble up unchanged:**
//! - `OrganizatextError::Io` (from `std::io::Error`) - missing files, permission errors
//!
//! **Application errors are wrapped with context:**
//! - `Validation` - invalid configuration, files outside upload limits
//! - `Processing` - failures while analysing one file
//! - `Serialization` - JSON/TOML/YAML encoding problems
//! - `Export` - ZIP archive generation failures
//!
//! **Per-file failures never poison the worker pool.** A failed analysis is reported
//! as [`OrganizatextError::JobFailed`] to the caller that submitted that file only.
//!
//! # Example
//!
//! ```rust
//! use organizatext::{OrganizatextError, Result};
//!
//! fn read_document(path: &str) -> Result<String> {
//!     let content = std::fs::read_to_string(path)?;
//!
//!     if content.trim().is_empty() {
//!         return Err(OrganizatextError::validation(format!("File is empty: {}", path)));
//!     }
//!
//!     Ok(content)
//! }
//! ```
use thiserror::Error;

/// Result type alias using `OrganizatextError`.
pub type Result<T> = std::result::Result<T, OrganizatextError>;

/// Main error type for all Organizatext operations.
#[derive(Debug, Error)]
pub enum OrganizatextError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Processing error: {message}")]
    Processing {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Export error: {message}")]
    Export {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A submitted file finished with a failed outcome.
    #[error("Processing of '{file_name}' failed: {message}")]
    JobFailed { file_name: String, message: String },

    /// The pool was terminated before the job completed.
    #[error("Job for '{file_id}' was abandoned by pool termination")]
    JobAbandoned { file_id: String },

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for OrganizatextError {
    fn from(err: serde_json::Error) -> Self {
        OrganizatextError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<toml::ser::Error> for OrganizatextError {
    fn from(err: toml::ser::Error) -> Self {
        OrganizatextError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(feature = "export")]
impl From<zip::result::ZipError> for OrganizatextError {
    fn from(err: zip::result::ZipError) -> Self {
        OrganizatextError::Export {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}


macro_rules! error_constructor {
    ($name:ident, $variant:ident) => {
        pastey::paste! {
            #[doc = "Create a " $variant " error"]
            pub fn $name<S: Into<String>>(message: S) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: None,
                }
            }

            #[doc = "Create a " $variant " error with source"]
            pub fn [<$name _with_source>]<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
                message: S,
                source: E,
            ) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: Some(Box::new(source)),
                }
            }
        }
    };
}

impl OrganizatextError {
    error_constructor!(validation, Validation);
    error_constructor!(processing, Processing);
    error_constructor!(serialization, Serialization);
    error_constructor!(export, Export);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: OrganizatextError = io_err.into();
        assert!(matches!(err, OrganizatextError::Io(_)));
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_validation_error() {
        let err = OrganizatextError::validation("too many files");
        assert_eq!(err.to_string(), "Validation error: too many files");
    }

    #[test]
    fn test_processing_error_with_source() {
        let source = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad bytes");
        let err = OrganizatextError::processing_with_source("cannot decode", source);
        assert_eq!(err.to_string(), "Processing error: cannot decode");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_export_error() {
        let err = OrganizatextError::export("no files");
        assert_eq!(err.to_string(), "Export error: no files");
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn test_job_failed_error() {
        let err = OrganizatextError::JobFailed {
            file_name: "notas.txt".to_string(),
            message: "stream did not contain valid UTF-8".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Processing of 'notas.txt' failed: stream did not contain valid UTF-8"
        );
    }

    #[test]
    fn test_job_abandoned_error() {
        let err = OrganizatextError::JobAbandoned {
            file_id: "file-7".to_string(),
        };
        assert!(err.to_string().contains("file-7"));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: OrganizatextError = json_err.into();
        assert!(matches!(err, OrganizatextError::Serialization { .. }));
        assert!(err.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_io_error_bubbles_unchanged() {
        fn read_file() -> Result<String> {
            let content = std::fs::read_to_string("/nonexistent/organizatext/file.txt")?;
            Ok(content)
        }

        assert!(matches!(read_file().unwrap_err(), OrganizatextError::Io(_)));
    }
}
