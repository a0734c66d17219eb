//! Regex-based extractors for URLs, emails, phone numbers and a PII heuristic.
//!
//! Every extractor returns matches deduplicated in first-occurrence order and
//! exactly as they appear in the text (no canonicalization).

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)https?://\S+").expect("URL regex pattern is valid and should compile"));
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9_.-]+@[A-Za-z0-9_.-]+\.[A-Za-z0-9_]+").expect("Email regex pattern is valid and should compile")
});
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+[0-9]{1,3}[\s-]?)?\(?[0-9]{3}\)?[\s.-]?[0-9]{3}[\s.-]?[0-9]{4}")
        .expect("Phone regex pattern is valid and should compile")
});

/// National ID / tax numbers (8-10 digits) and passport-like codes (2 letters + 6-8 digits).
static DOCUMENT_PATTERNS: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        Regex::new(r"\b[0-9]{8,10}\b").expect("Document number regex pattern is valid and should compile"),
        Regex::new(r"\b[A-Z]{2}[0-9]{6,8}\b").expect("Passport regex pattern is valid and should compile"),
    ]
});

fn unique_matches(pattern: &Regex, text: &str) -> Vec<String> {
    pattern
        .find_iter(text)
        .map(|m| m.as_str())
        .collect::<IndexSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Extract `http://` and `https://` links.
pub fn extract_urls(text: &str) -> Vec<String> {
    unique_matches(&URL_PATTERN, text)
}

/// Extract email addresses.
pub fn extract_emails(text: &str) -> Vec<String> {
    unique_matches(&EMAIL_PATTERN, text)
}

/// Extract phone numbers in 3-3-4 grouping with an optional international prefix.
pub fn extract_phones(text: &str) -> Vec<String> {
    unique_matches(&PHONE_PATTERN, text)
}

/// Whether the text contains something shaped like an identity document number.
pub fn contains_document_number(text: &str) -> bool {
    DOCUMENT_PATTERNS.iter().any(|pattern| pattern.is_match(text))
}

/// Kind of personally identifiable information found in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PiiType {
    #[serde(rename = "emails")]
    Emails,
    #[serde(rename = "teléfonos")]
    Phones,
    #[serde(rename = "posibles documentos")]
    PossibleDocuments,
}

impl PiiType {
    /// Label used in records and exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            PiiType::Emails => "emails",
            PiiType::Phones => "teléfonos",
            PiiType::PossibleDocuments => "posibles documentos",
        }
    }
}

impl fmt::Display for PiiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the PII heuristic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiiReport {
    pub detected: bool,
    pub types: Vec<PiiType>,
}

/// Flag PII from already extracted emails and phones plus a document-number scan.
pub fn detect_pii(text: &str, emails: &[String], phones: &[String]) -> PiiReport {
    let mut types = Vec::new();

    if !emails.is_empty() {
        types.push(PiiType::Emails);
    }
    if !phones.is_empty() {
        types.push(PiiType::Phones);
    }
    if contains_document_number(text) {
        types.push(PiiType::PossibleDocuments);
    }

    PiiReport {
        detected: !types.is_empty(),
        types,
    }
}

/// All pattern matches of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternMatches {
    pub urls: Vec<String>,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub pii: PiiReport,
}

/// Run every extractor over `text`.
pub fn extract_patterns(text: &str) -> PatternMatches {
    let urls = extract_urls(text);
    let emails = extract_emails(text);
    let phones = extract_phones(text);
    let pii = detect_pii(text, &emails, &phones);

    PatternMatches {
        urls,
        emails,
        phones,
        pii,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTACT: &str = "Contacto: ana@example.com, +1 555-123-4567, visita https://example.com";

    #[test]
    fn test_contact_sample() {
        let matches = extract_patterns(CONTACT);
        assert_eq!(matches.urls, vec!["https://example.com"]);
        assert_eq!(matches.emails, vec!["ana@example.com"]);
        assert_eq!(matches.phones, vec!["+1 555-123-4567"]);
        assert!(matches.pii.detected);
        assert_eq!(matches.pii.types, vec![PiiType::Emails, PiiType::Phones]);
    }

    #[test]
    fn test_urls_deduplicated_in_order() {
        let text = "ver https://b.org y http://a.com luego https://b.org otra vez";
        assert_eq!(extract_urls(text), vec!["https://b.org", "http://a.com"]);
    }

    #[test]
    fn test_urls_case_insensitive_scheme_and_no_canonicalization() {
        let text = "HTTPS://Example.com/Path?q=1 y https://example.com/path?q=1";
        assert_eq!(
            extract_urls(text),
            vec!["HTTPS://Example.com/Path?q=1", "https://example.com/path?q=1"]
        );
    }

    #[test]
    fn test_url_keeps_trailing_punctuation() {
        assert_eq!(extract_urls("(https://example.com/a)."), vec!["https://example.com/a)."]);
    }

    #[test]
    fn test_emails() {
        let text = "escribe a juan.perez-2@mail.example.org o a juan.perez-2@mail.example.org; no a @nadie.com";
        assert_eq!(extract_emails(text), vec!["juan.perez-2@mail.example.org"]);
    }

    #[test]
    fn test_phone_formats() {
        assert_eq!(extract_phones("llama al (555) 123-4567"), vec!["(555) 123-4567"]);
        assert_eq!(extract_phones("tel 555.123.4567"), vec!["555.123.4567"]);
        assert_eq!(extract_phones("tel 5551234567"), vec!["5551234567"]);
        assert_eq!(extract_phones("+34 600 123 4567"), vec!["+34 600 123 4567"]);
        assert!(extract_phones("tel 555-12-34").is_empty());
    }

    #[test]
    fn test_extractors_are_idempotent() {
        let text = "a@b.co https://x.io a@b.co 555 123 4567 https://x.io";
        assert_eq!(extract_urls(text), extract_urls(text));
        assert_eq!(extract_emails(text), extract_emails(text));
        assert_eq!(extract_phones(text), extract_phones(text));
    }

    #[test]
    fn test_document_numbers() {
        assert!(contains_document_number("DNI 12345678"));
        assert!(contains_document_number("CC 1234567890"));
        assert!(contains_document_number("pasaporte AB1234567"));
        assert!(!contains_document_number("codigo 1234567"));
        assert!(!contains_document_number("serie 12345678901"));
        assert!(!contains_document_number("ab1234567"));
    }

    #[test]
    fn test_pii_only_documents() {
        let report = detect_pii("cedula 87654321", &[], &[]);
        assert!(report.detected);
        assert_eq!(report.types, vec![PiiType::PossibleDocuments]);
    }

    #[test]
    fn test_no_pii() {
        let report = detect_pii("reunion el martes", &[], &[]);
        assert_eq!(report, PiiReport::default());
    }

    #[test]
    fn test_pii_type_serialization() {
        let json = serde_json::to_string(&vec![PiiType::Emails, PiiType::Phones, PiiType::PossibleDocuments]).unwrap();
        assert_eq!(json, r#"["emails","teléfonos","posibles documentos"]"#);
        assert_eq!(PiiType::Phones.to_string(), "teléfonos");
    }
}
