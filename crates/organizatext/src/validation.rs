//! Upload validation.
//!
//! Checks a selection of files against [`LimitsConfig`] before any of them is
//! analysed: file count, total size, per-file size and the `.txt` extension.
//! Report messages are user-facing and kept in Spanish like the rest of the
//! generated data (categories, PII type labels).

use crate::processor::InputFile;
use crate::{OrganizatextError, Result};
use serde::{Deserialize, Serialize};

const MB_TO_BYTES: f64 = 1024.0 * 1024.0;

/// Fraction of the total size limit above which a warning is emitted.
const TOTAL_SIZE_WARNING_RATIO: f64 = 0.8;

/// Upload limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum size of one file in MB (default: 10).
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: f64,

    /// Maximum combined size in MB (default: 50).
    #[serde(default = "default_max_total_size_mb")]
    pub max_total_size_mb: f64,

    /// Maximum number of files per selection (default: 200).
    #[serde(default = "default_max_files_count")]
    pub max_files_count: usize,
}

fn default_max_file_size_mb() -> f64 {
    10.0
}

fn default_max_total_size_mb() -> f64 {
    50.0
}

fn default_max_files_count() -> usize {
    200
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: default_max_file_size_mb(),
            max_total_size_mb: default_max_total_size_mb(),
            max_files_count: default_max_files_count(),
        }
    }
}

impl LimitsConfig {
    pub fn validate(&self) -> Result<()> {
        if !is_positive(self.max_file_size_mb) || !is_positive(self.max_total_size_mb) {
            return Err(OrganizatextError::validation("limits must be positive sizes"));
        }
        if self.max_files_count == 0 {
            return Err(OrganizatextError::validation("limits.max_files_count must be at least 1"));
        }
        Ok(())
    }
}

fn is_positive(size_mb: f64) -> bool {
    size_mb > 0.0
}

/// Anything with a name and a size can be validated.
pub trait UploadFile {
    fn file_name(&self) -> &str;
    fn size_bytes(&self) -> u64;
}

/// Name and size of a file, without its content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSummary {
    pub name: String,
    pub size: u64,
}

impl FileSummary {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self { name: name.into(), size }
    }
}

impl UploadFile for FileSummary {
    fn file_name(&self) -> &str {
        &self.name
    }

    fn size_bytes(&self) -> u64 {
        self.size
    }
}

impl UploadFile for InputFile {
    fn file_name(&self) -> &str {
        &self.name
    }

    fn size_bytes(&self) -> u64 {
        self.size
    }
}

impl From<&InputFile> for FileSummary {
    fn from(file: &InputFile) -> Self {
        Self::new(file.name.clone(), file.size)
    }
}

/// Aggregate numbers of a selection, sizes rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationStats {
    pub file_count: usize,
    #[serde(rename = "totalSizeMB")]
    pub total_size_mb: f64,
    #[serde(rename = "averageSizeMB")]
    pub average_size_mb: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    /// Informational only; never make a selection invalid.
    pub warnings: Vec<String>,
    /// Absent when the selection is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<ValidationStats>,
}

fn size_mb(bytes: u64) -> f64 {
    bytes as f64 / MB_TO_BYTES
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn has_txt_extension(name: &str) -> bool {
    name.to_lowercase().ends_with(".txt")
}

/// Validate a selection of files.
///
/// # Example
///
/// ```rust
/// use organizatext::validation::{FileSummary, LimitsConfig, validate_files};
///
/// let files = vec![FileSummary::new("notas.txt", 2048), FileSummary::new("foto.png", 10)];
/// let report = validate_files(&files, &LimitsConfig::default());
/// assert!(!report.valid);
/// assert_eq!(report.errors.len(), 1);
/// ```
pub fn validate_files<F: UploadFile>(files: &[F], limits: &LimitsConfig) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if files.is_empty() {
        errors.push("No se seleccionaron archivos".to_string());
        return ValidationReport {
            valid: false,
            errors,
            warnings,
            stats: None,
        };
    }

    if files.len() > limits.max_files_count {
        errors.push(format!(
            "Demasiados archivos: {} (máximo {})",
            files.len(),
            limits.max_files_count
        ));
    }

    let total_size_mb = size_mb(files.iter().map(UploadFile::size_bytes).sum());
    if total_size_mb > limits.max_total_size_mb {
        errors.push(format!(
            "Tamaño total excede el límite: {:.2} MB (máximo {} MB)",
            total_size_mb, limits.max_total_size_mb
        ));
    }

    let oversized: Vec<String> = files
        .iter()
        .filter(|f| size_mb(f.size_bytes()) > limits.max_file_size_mb)
        .map(|f| format!("{} ({:.2} MB)", f.file_name(), size_mb(f.size_bytes())))
        .collect();
    if !oversized.is_empty() {
        errors.push(format!(
            "Archivos que exceden {} MB: {}",
            limits.max_file_size_mb,
            oversized.join(", ")
        ));
    }

    let wrong_extension: Vec<&str> = files
        .iter()
        .map(UploadFile::file_name)
        .filter(|name| !has_txt_extension(name))
        .collect();
    if !wrong_extension.is_empty() {
        errors.push(format!(
            "Archivos con extensión no válida: {}. Solo se permiten archivos .txt",
            wrong_extension.join(", ")
        ));
    }

    if total_size_mb > limits.max_total_size_mb * TOTAL_SIZE_WARNING_RATIO {
        warnings.push(format!(
            "Estás cerca del límite de tamaño total ({:.2} MB / {} MB)",
            total_size_mb, limits.max_total_size_mb
        ));
    }

    tracing::debug!(
        files = files.len(),
        errors = errors.len(),
        warnings = warnings.len(),
        "Validated file selection"
    );

    ValidationReport {
        valid: errors.is_empty(),
        errors,
        warnings,
        stats: Some(ValidationStats {
            file_count: files.len(),
            total_size_mb: round2(total_size_mb),
            average_size_mb: round2(total_size_mb / files.len() as f64),
        }),
    }
}

/// Files with a `.txt` extension and within the per-file size limit.
pub fn filter_valid_files<'a, F: UploadFile>(files: &'a [F], limits: &LimitsConfig) -> Vec<&'a F> {
    files
        .iter()
        .filter(|f| has_txt_extension(f.file_name()) && size_mb(f.size_bytes()) <= limits.max_file_size_mb)
        .collect()
}

/// Longest prefix of the valid files that fits the count and total-size limits.
pub fn valid_subset<'a, F: UploadFile>(files: &'a [F], limits: &LimitsConfig) -> Vec<&'a F> {
    let mut total_bytes: u64 = 0;
    let mut subset = Vec::new();

    for file in filter_valid_files(files, limits) {
        if subset.len() >= limits.max_files_count {
            break;
        }
        let new_total = total_bytes + file.size_bytes();
        if size_mb(new_total) > limits.max_total_size_mb {
            break;
        }
        subset.push(file);
        total_bytes = new_total;
    }

    subset
}
