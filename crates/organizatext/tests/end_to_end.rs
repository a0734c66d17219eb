//! End-to-end analysis tests.
//!
//! Runs real documents through the public API:
//! - keyword ranking properties
//! - pattern extraction on a contact card
//! - pool processing of mixed files

use organizatext::keywords::{KeywordConfig, extract_keywords, extract_keywords_simple};
use organizatext::patterns::{PiiType, extract_patterns};
use organizatext::{FileProcessor, HeuristicRecognizer, InputFile, PoolConfig, WorkerPool};
use std::sync::Arc;

const CONTACT: &str = "Contacto: ana@example.com, +1 555-123-4567, visita https://example.com";

const MEETING: &str = "Acta de la reunión del comité de presupuesto.
Asistentes: Sra. Laura Gómez y Dr. Martín Pérez.
Se aprobó el presupuesto anual de la Fundación Aurora S.A. el 12 de marzo de 2024.
Próxima reunión del comité de presupuesto en la ciudad de Valencia.";

#[test]
fn test_single_run_scores_13_5() {
    let keywords = extract_keywords("investigación profunda hoy", &KeywordConfig::default());
    assert_eq!(keywords.len(), 1);
    assert_eq!(keywords[0].text, "investigacion profunda hoy");
    assert_eq!(keywords[0].score, 13.5);
}

#[test]
fn test_keywords_are_bounded_and_sorted() {
    for n in [1, 3, 10] {
        let keywords = extract_keywords(MEETING, &KeywordConfig::default().with_max_keywords(n));
        assert!(keywords.len() <= n);
        assert!(!keywords.is_empty());
        for pair in keywords.windows(2) {
            assert!(pair[0].score >= pair[1].score, "{:?} before {:?}", pair[0], pair[1]);
        }
    }
}

#[test]
fn test_stopword_only_and_blank_input() {
    assert!(extract_keywords_simple("el la de para con", 10).is_empty());
    assert!(extract_keywords_simple("   \n\t ", 10).is_empty());
    assert!(extract_keywords_simple("", 10).is_empty());
}

#[test]
fn test_contact_sample() {
    let matches = extract_patterns(CONTACT);
    assert_eq!(matches.emails, vec!["ana@example.com"]);
    assert_eq!(matches.phones, vec!["+1 555-123-4567"]);
    assert_eq!(matches.urls, vec!["https://example.com"]);
    assert!(matches.pii.detected);
    assert_eq!(matches.pii.types, vec![PiiType::Emails, PiiType::Phones]);
}

#[test]
fn test_pattern_extraction_is_idempotent() {
    let doubled = format!("{CONTACT}\n{CONTACT}");
    assert_eq!(extract_patterns(&doubled), extract_patterns(CONTACT));
}

#[test]
fn test_meeting_record_with_entities() {
    let processor = FileProcessor::default().with_entity_recognizer(Arc::new(HeuristicRecognizer));
    let record = processor
        .process(&InputFile::from_bytes("acta.txt", MEETING.as_bytes().to_vec()))
        .into_result()
        .unwrap();

    assert!(!record.pii_detected);
    assert!(record.keywords.iter().any(|k| k.contains("presupuesto")));
    assert!(record.tags.len() <= 20);

    let values: Vec<&str> = record.entities.iter().map(|e| e.value.as_str()).collect();
    assert!(values.contains(&"Laura Gómez"), "entities: {:?}", values);
    assert!(values.contains(&"Valencia"), "entities: {:?}", values);
}

#[tokio::test]
async fn test_pool_processes_mixed_files() {
    let pool = WorkerPool::new(PoolConfig { pool_size: 2 }, FileProcessor::default());
    let files = vec![
        InputFile::from_bytes("contacto.txt", CONTACT.as_bytes().to_vec()),
        InputFile::from_bytes("acta.txt", MEETING.as_bytes().to_vec()),
        InputFile::from_bytes("vacio.txt", Vec::new()),
    ];

    let report = pool.process_batch(files, None).await;
    assert_eq!(report.processed, 3);
    assert_eq!(report.failed, 0);

    let json = serde_json::to_value(&report.results[0]).unwrap();
    assert_eq!(json["result"]["data"]["piiTypes"], serde_json::json!(["emails", "teléfonos"]));
    assert_eq!(json["result"]["data"]["wordCount"], 6);

    pool.terminate();
}
