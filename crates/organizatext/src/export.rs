//! Export of analysed files.
//!
//! Two formats are produced:
//!
//! - a ZIP archive ([`export_zip`], `export` feature) with one folder per category
//!   holding the original file bytes, a `metadata.json` and a `README.txt`;
//! - a JSON document with the metadata only ([`export_metadata`]).
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "export")]
//! # fn main() -> organizatext::Result<()> {
//! use organizatext::export::{ExportEntry, export_zip};
//! use organizatext::processor::{FileProcessor, InputFile};
//! use std::io::Cursor;
//!
//! let file = InputFile::from_bytes("acta.txt", b"Acta de la reunion de equipo".to_vec());
//! let record = FileProcessor::default().process(&file).into_result()?;
//!
//! let entries = vec![ExportEntry::new(record, Some(file.data)).with_category("Reuniones")];
//! let summary = export_zip(&entries, Cursor::new(Vec::new()))?;
//! assert_eq!(summary.files_written, 1);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "export"))]
//! # fn main() {}
//! ```

use crate::patterns::PiiType;
use crate::processor::FileRecord;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "export")]
use crate::{OrganizatextError, Result};
#[cfg(feature = "export")]
use ahash::AHashSet;
#[cfg(feature = "export")]
use indexmap::IndexMap;
#[cfg(feature = "export")]
use std::io::{Seek, Write};
#[cfg(feature = "export")]
use std::path::Path;

/// Category assigned to entries without one.
pub const UNCATEGORIZED: &str = "Sin categoría";

/// Predefined categories offered to users.
pub const DEFAULT_CATEGORIES: [&str; 8] = [
    UNCATEGORIZED,
    "Contactos",
    "Documentación",
    "Finanzas",
    "Ideas",
    "Código",
    "Reuniones",
    "Personal",
];

const MAX_FOLDER_NAME_CHARS: usize = 50;

#[cfg(feature = "export")]
const DEFLATE_LEVEL: i64 = 6;

#[cfg(feature = "export")]
const PROJECT_URL: &str = "https://github.com/Andr-Abr/organizatext";

/// One analysed file selected for export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportEntry {
    pub record: FileRecord,
    pub category: Option<String>,
    /// Original bytes. Entries without content are listed in the metadata but not
    /// written to the archive.
    pub content: Option<Vec<u8>>,
}

impl ExportEntry {
    pub fn new(record: FileRecord, content: Option<Vec<u8>>) -> Self {
        Self {
            record,
            category: None,
            content,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Category, falling back to [`UNCATEGORIZED`] when unset or blank.
    pub fn category(&self) -> &str {
        self.category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(UNCATEGORIZED)
    }
}

/// Per-file entry of an export's metadata.
///
/// The pattern counts and PII types are only present in archive metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedFile {
    pub file_name: String,
    pub file_size: u64,
    pub category: String,
    pub tags: Vec<String>,
    #[serde(rename = "detectado_PII")]
    pub pii_detected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pii_types: Option<Vec<PiiType>>,
    pub word_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urls: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emails: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phones: Option<usize>,
    pub processed_at: DateTime<Utc>,
}

impl ExportedFile {
    fn summary(entry: &ExportEntry) -> Self {
        let record = &entry.record;
        Self {
            file_name: record.file_name.clone(),
            file_size: record.file_size,
            category: entry.category().to_string(),
            tags: record.tags.clone(),
            pii_detected: record.pii_detected,
            pii_types: None,
            word_count: record.word_count,
            urls: None,
            emails: None,
            phones: None,
            processed_at: record.processed_at,
        }
    }

    fn detailed(entry: &ExportEntry) -> Self {
        let record = &entry.record;
        Self {
            pii_types: Some(record.pii_types.clone()),
            urls: Some(record.urls.len()),
            emails: Some(record.emails.len()),
            phones: Some(record.phones.len()),
            ..Self::summary(entry)
        }
    }
}

/// Content of `metadata.json` and of metadata-only exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataExport {
    pub exported_at: DateTime<Utc>,
    pub total_files: usize,
    /// Category names in first-occurrence order. Archive metadata only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    pub files: Vec<ExportedFile>,
}

/// What an archive export wrote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSummary {
    /// Original files written into category folders.
    pub files_written: usize,
    /// Names of entries listed in the metadata but missing content.
    pub skipped: Vec<String>,
    pub categories: Vec<String>,
    /// Size of the finished archive in bytes.
    pub archive_size: u64,
}

/// Make a category usable as a folder name.
///
/// Characters invalid in file names and whitespace runs become `_`; the result is
/// cut to 50 characters.
pub fn sanitize_folder_name(name: &str) -> String {
    let mut sanitized = String::with_capacity(name.len());
    let mut in_whitespace = false;

    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                sanitized.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => sanitized.push('_'),
            _ => sanitized.push(c),
        }
    }

    sanitized.chars().take(MAX_FOLDER_NAME_CHARS).collect()
}

/// `{prefix}-YYYYMMDD.{extension}`, e.g. `organizatext-export-20240501.zip`.
pub fn export_file_name(prefix: &str, date: NaiveDate, extension: &str) -> String {
    format!("{}-{}.{}", prefix, date.format("%Y%m%d"), extension)
}

/// Default archive name for today (UTC).
pub fn default_archive_name() -> String {
    export_file_name("organizatext-export", Utc::now().date_naive(), "zip")
}

/// Default metadata file name for today (UTC).
pub fn default_metadata_name() -> String {
    export_file_name("organizatext-metadata", Utc::now().date_naive(), "json")
}

#[cfg(feature = "export")]
fn group_by_category(entries: &[ExportEntry]) -> IndexMap<&str, Vec<&ExportEntry>> {
    let mut groups: IndexMap<&str, Vec<&ExportEntry>> = IndexMap::new();
    for entry in entries {
        groups.entry(entry.category()).or_default().push(entry);
    }
    groups
}

/// Metadata-only export.
pub fn export_metadata(entries: &[ExportEntry]) -> MetadataExport {
    MetadataExport {
        exported_at: Utc::now(),
        total_files: entries.len(),
        categories: None,
        files: entries.iter().map(ExportedFile::summary).collect(),
    }
}

#[cfg(feature = "export")]
fn archive_metadata(entries: &[ExportEntry], categories: &[String], exported_at: DateTime<Utc>) -> MetadataExport {
    MetadataExport {
        exported_at,
        total_files: entries.len(),
        categories: Some(categories.to_vec()),
        files: entries.iter().map(ExportedFile::detailed).collect(),
    }
}

#[cfg(feature = "export")]
fn readme(total_files: usize, category_count: usize, exported_at: DateTime<Utc>) -> String {
    format!(
        "Organizatext - Exportación
============================

Fecha de exportación: {}
Total de archivos: {}
Categorías: {}

Estructura:
-----------
Los archivos están organizados en carpetas por categoría.
El archivo metadata.json contiene toda la información extraída (etiquetas, URLs, emails, etc).

Para más información: {}
",
        exported_at.format("%Y-%m-%d %H:%M:%S UTC"),
        total_files,
        category_count,
        PROJECT_URL
    )
}

/// Path inside `folder` that is not taken yet. Repeated names get ` (2)`, ` (3)`...
/// before the extension.
#[cfg(feature = "export")]
fn unique_path(folder: &str, file_name: &str, taken: &mut AHashSet<String>) -> String {
    let candidate = format!("{}/{}", folder, file_name);
    if taken.insert(candidate.clone()) {
        return candidate;
    }

    let (stem, extension) = match file_name.rfind('.') {
        Some(dot) if dot > 0 => (&file_name[..dot], &file_name[dot..]),
        _ => (file_name, ""),
    };
    let mut n = 2;
    loop {
        let candidate = format!("{}/{} ({}){}", folder, stem, n, extension);
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

/// Write a ZIP archive of `entries` into `writer`.
///
/// Returns an error when `entries` is empty.
#[cfg(feature = "export")]
pub fn export_zip<W: Write + Seek>(entries: &[ExportEntry], writer: W) -> Result<ExportSummary> {
    use zip::CompressionMethod;
    use zip::write::{SimpleFileOptions, ZipWriter};

    if entries.is_empty() {
        return Err(OrganizatextError::export("No hay archivos para exportar"));
    }

    let exported_at = Utc::now();
    let groups = group_by_category(entries);
    let categories: Vec<String> = groups.keys().map(|c| c.to_string()).collect();

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(DEFLATE_LEVEL));

    let mut zip = ZipWriter::new(writer);
    let mut taken = AHashSet::new();
    let mut folders = AHashSet::new();
    let mut files_written = 0;
    let mut skipped = Vec::new();

    for (category, group) in &groups {
        // Distinct categories can share a sanitized folder.
        let folder = sanitize_folder_name(category);
        if folders.insert(folder.clone()) {
            zip.add_directory(format!("{}/", folder), options)?;
        }

        for entry in group {
            let Some(content) = entry.content.as_deref() else {
                tracing::warn!(file = %entry.record.file_name, "No content found for export entry, skipping");
                skipped.push(entry.record.file_name.clone());
                continue;
            };

            let path = unique_path(&folder, &entry.record.file_name, &mut taken);
            zip.start_file(path, options)?;
            zip.write_all(content)?;
            files_written += 1;
        }
    }

    let metadata = archive_metadata(entries, &categories, exported_at);
    zip.start_file("metadata.json", options)?;
    zip.write_all(serde_json::to_string_pretty(&metadata)?.as_bytes())?;

    zip.start_file("README.txt", options)?;
    zip.write_all(readme(entries.len(), categories.len(), exported_at).as_bytes())?;

    let mut writer = zip.finish()?;
    let archive_size = writer.stream_position()?;

    tracing::info!(
        files = files_written,
        skipped = skipped.len(),
        categories = categories.len(),
        bytes = archive_size,
        "Export archive written"
    );

    Ok(ExportSummary {
        files_written,
        skipped,
        categories,
        archive_size,
    })
}

/// Write a ZIP archive of `entries` to a file at `path`.
#[cfg(feature = "export")]
pub fn export_zip_to_path(entries: &[ExportEntry], path: impl AsRef<Path>) -> Result<ExportSummary> {
    let file = std::fs::File::create(path.as_ref())?;
    export_zip(entries, std::io::BufWriter::new(file))
}
