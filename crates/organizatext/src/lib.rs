//! Organizatext - text document organizing core
//!
//! Organizatext analyses plain-text files: it extracts RAKE keyword phrases, URLs,
//! emails and phone numbers, flags likely personal data, optionally recognizes named
//! entities, and derives tags. Files are analysed by a bounded pool of background
//! workers, and analysed selections can be validated and exported as ZIP archives.
//!
//! # Quick Start
//!
//! ```rust
//! use organizatext::processor::{FileProcessor, InputFile};
//!
//! # fn main() -> organizatext::Result<()> {
//! let file = InputFile::from_bytes(
//!     "contacto.txt",
//!     b"Contacto: ana@example.com, +1 555-123-4567, visita https://example.com".to_vec(),
//! );
//! let record = FileProcessor::default().process(&file).into_result()?;
//!
//! assert_eq!(record.emails, vec!["ana@example.com"]);
//! assert!(record.pii_detected);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Stopwords** (`stopwords`): embedded Spanish stopword set, extensible at runtime
//! - **Text** (`text`): normalization and counting helpers
//! - **Keywords** (`keywords`): RAKE keyword extraction
//! - **Patterns** (`patterns`): URL/email/phone extraction and PII heuristics
//! - **Entities** (`entities`): pluggable named-entity recognition
//! - **Processor** (`processor`): per-file analysis record
//! - **Pool** (`pool`): bounded worker pool, batch processing and pool registry
//! - **Validation** (`validation`): upload limits
//! - **Export** (`export`): ZIP and metadata export
//! - **Core** (`core`): configuration loading

#![deny(unsafe_code)]

pub mod core;
pub mod entities;
pub mod error;
pub mod export;
pub mod keywords;
pub mod patterns;
pub mod pool;
pub mod processor;
pub mod stopwords;
pub mod text;
pub mod validation;

pub use error::{OrganizatextError, Result};

pub use core::config::{OrganizatextConfig, PoolConfig, ProcessingConfig};
pub use entities::{Entity, EntityKind, EntityRecognizer, HeuristicRecognizer};
pub use keywords::{Keyword, KeywordConfig, extract_keywords, extract_keywords_simple};
pub use patterns::{PiiReport, PiiType, detect_pii, extract_emails, extract_phones, extract_urls};
pub use pool::{
    BatchReport, CompletionEvent, JobHandle, PoolRegistry, PoolStats, ProgressCallback, ProgressEvent, WorkerPool,
};
pub use processor::{FileProcessor, FileRecord, InputFile, ProcessOutcome};
pub use validation::{FileSummary, LimitsConfig, ValidationReport, validate_files};

#[cfg(feature = "export")]
pub use export::export_zip;
pub use export::{ExportEntry, ExportSummary, MetadataExport, export_metadata};
