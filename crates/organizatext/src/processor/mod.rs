//! Per-file analysis.
//!
//! [`FileProcessor`] turns one [`InputFile`] into a [`FileRecord`]: URLs, emails,
//! phones, RAKE keywords, optional entities, tags, PII flags and basic counts.
//! Processing never returns an error to the caller; failures become
//! [`ProcessOutcome::Failed`].

mod input;
mod outcome;

pub use input::InputFile;
pub use outcome::{FileRecord, ProcessOutcome};

use crate::Result;
use crate::core::config::ProcessingConfig;
use crate::entities::{EntityRecognizer, EntityStage};
use crate::keywords::{KeywordConfig, extract_keywords};
use crate::patterns::extract_patterns;
use crate::text::{char_count, word_count};
use chrono::Utc;
use std::sync::Arc;

/// Analyses files one at a time.
///
/// The entity recognizer, if any, is shared; its lazy initialization is cached per
/// processor instance. Use [`FileProcessor::for_worker`] to give each worker its own
/// cache.
pub struct FileProcessor {
    keywords: KeywordConfig,
    processing: ProcessingConfig,
    entities: EntityStage,
}

impl FileProcessor {
    /// Processor without entity recognition.
    pub fn new(keywords: KeywordConfig, processing: ProcessingConfig) -> Self {
        Self {
            keywords,
            processing,
            entities: EntityStage::new(None),
        }
    }

    /// Attach an entity recognizer.
    pub fn with_entity_recognizer(mut self, recognizer: Arc<dyn EntityRecognizer>) -> Self {
        self.entities = EntityStage::new(Some(recognizer));
        self
    }

    /// Whether an entity recognizer is configured.
    pub fn has_entity_recognizer(&self) -> bool {
        self.entities.is_present()
    }

    /// Same configuration and recognizer, fresh initialization cache.
    pub fn for_worker(&self) -> Self {
        Self {
            keywords: self.keywords.clone(),
            processing: self.processing.clone(),
            entities: EntityStage::new(self.entities.recognizer().cloned()),
        }
    }

    /// Analyse one file.
    pub fn process(&self, file: &InputFile) -> ProcessOutcome {
        match self.analyse(file) {
            Ok(record) => ProcessOutcome::Processed(Box::new(record)),
            Err(e) => {
                tracing::debug!(file = %file.name, "File processing failed: {}", e);
                ProcessOutcome::Failed {
                    error: e.to_string(),
                    file_name: file.name.clone(),
                }
            }
        }
    }

    fn analyse(&self, file: &InputFile) -> Result<FileRecord> {
        let text = file.text(self.processing.strict_utf8)?;

        let patterns = extract_patterns(&text);
        let keywords: Vec<String> = extract_keywords(&text, &self.keywords)
            .into_iter()
            .map(|k| k.text)
            .collect();
        let entities = self.entities.recognize(&text);

        let tags = keywords
            .iter()
            .cloned()
            .chain(entities.iter().map(|e| e.value.clone()))
            .take(self.processing.max_tags)
            .collect();

        Ok(FileRecord {
            file_name: file.name.clone(),
            file_size: file.size,
            urls: patterns.urls,
            emails: patterns.emails,
            phones: patterns.phones,
            keywords,
            entities,
            tags,
            pii_detected: patterns.pii.detected,
            pii_types: patterns.pii.types,
            word_count: word_count(&text),
            char_count: char_count(&text),
            processed_at: Utc::now(),
        })
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new(KeywordConfig::default(), ProcessingConfig::default())
    }
}

impl std::fmt::Debug for FileProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileProcessor")
            .field("keywords", &self.keywords)
            .field("processing", &self.processing)
            .field("entity_recognizer", &self.entities.recognizer().map(|r| r.name().to_string()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{EntityKind, HeuristicRecognizer};
    use crate::patterns::PiiType;

    const CONTACT: &str = "Contacto: ana@example.com, +1 555-123-4567, visita https://example.com";

    #[test]
    fn test_contact_file() {
        let processor = FileProcessor::default();
        let outcome = processor.process(&InputFile::from_bytes("contacto.txt", CONTACT.as_bytes().to_vec()));

        let record = outcome.into_result().unwrap();
        assert_eq!(record.file_name, "contacto.txt");
        assert_eq!(record.file_size, CONTACT.len() as u64);
        assert_eq!(record.emails, vec!["ana@example.com"]);
        assert_eq!(record.phones, vec!["+1 555-123-4567"]);
        assert_eq!(record.urls, vec!["https://example.com"]);
        assert!(record.pii_detected);
        assert!(record.pii_types.contains(&PiiType::Emails));
        assert!(record.pii_types.contains(&PiiType::Phones));
        assert_eq!(record.word_count, 6);
        assert_eq!(record.char_count, CONTACT.chars().count());
        assert!(record.entities.is_empty());
    }

    #[test]
    fn test_keywords_and_tags() {
        let text = "Informe anual de ventas. Presupuesto trimestral para el Sr. Pablo Ruiz.";
        let processor = FileProcessor::default().with_entity_recognizer(Arc::new(HeuristicRecognizer));
        let record = processor
            .process(&InputFile::from_bytes("informe.txt", text.as_bytes().to_vec()))
            .into_result()
            .unwrap();

        assert!(!record.keywords.is_empty());
        assert!(record.keywords.len() <= 10);
        assert_eq!(
            record.entities.iter().map(|e| e.kind).collect::<Vec<_>>(),
            vec![EntityKind::Person]
        );
        assert_eq!(record.tags.len(), record.keywords.len() + 1);
        assert_eq!(record.tags.last().map(String::as_str), Some("Pablo Ruiz"));
        assert_eq!(&record.tags[..record.keywords.len()], record.keywords.as_slice());
    }

    #[test]
    fn test_tags_are_capped() {
        let processing = ProcessingConfig {
            max_tags: 3,
            ..Default::default()
        };
        let text = "alfa. de beta. de gamma. de delta. de epsilon";
        let processor = FileProcessor::new(KeywordConfig::default(), processing);
        let record = processor
            .process(&InputFile::from_bytes("x.txt", text.as_bytes().to_vec()))
            .into_result()
            .unwrap();

        assert_eq!(record.keywords.len(), 5);
        assert_eq!(record.tags.len(), 3);
    }

    #[test]
    fn test_empty_file() {
        let record = FileProcessor::default()
            .process(&InputFile::from_bytes("vacio.txt", Vec::new()))
            .into_result()
            .unwrap();

        assert!(record.keywords.is_empty());
        assert!(record.tags.is_empty());
        assert!(!record.pii_detected);
        assert_eq!(record.word_count, 0);
        assert_eq!(record.char_count, 0);
    }

    #[test]
    fn test_invalid_utf8_is_lossy_by_default() {
        let bytes = vec![b'h', b'o', b'l', b'a', b' ', 0xFF, b' ', b'm', b'u', b'n', b'd', b'o'];
        let record = FileProcessor::default()
            .process(&InputFile::from_bytes("raro.txt", bytes))
            .into_result()
            .unwrap();
        assert_eq!(record.word_count, 3);
    }

    #[test]
    fn test_invalid_utf8_fails_when_strict() {
        let processing = ProcessingConfig {
            strict_utf8: true,
            ..Default::default()
        };
        let processor = FileProcessor::new(KeywordConfig::default(), processing);
        let outcome = processor.process(&InputFile::from_bytes("raro.txt", vec![0xC3, 0x28]));

        match outcome {
            ProcessOutcome::Failed { error, file_name } => {
                assert_eq!(file_name, "raro.txt");
                assert!(error.contains("UTF-8"), "unexpected error: {}", error);
            }
            ProcessOutcome::Processed(_) => panic!("strict decoding should fail"),
        }
    }

    #[test]
    fn test_for_worker_keeps_recognizer() {
        let processor = FileProcessor::default().with_entity_recognizer(Arc::new(HeuristicRecognizer));
        let worker = processor.for_worker();
        assert!(worker.has_entity_recognizer());
        assert!(!FileProcessor::default().for_worker().has_entity_recognizer());
    }
}
