//! Configuration loading integration tests.
//!
//! Tests the config loading APIs:
//! - from_file() with TOML/YAML/JSON
//! - discover() for searching parent directories
//! - Error handling for invalid configs

use organizatext::OrganizatextError;
use organizatext::core::config::OrganizatextConfig;
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

/// Test loading every section from a TOML file.
#[test]
fn test_from_file_toml_all_sections() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    fs::write(
        &config_path,
        r#"
[pool]
pool_size = 4

[keywords]
max_keywords = 15

[processing]
max_tags = 12
strict_utf8 = true

[limits]
max_file_size_mb = 5
max_total_size_mb = 25
max_files_count = 40
"#,
    )
    .unwrap();

    let config = OrganizatextConfig::from_file(&config_path).unwrap();
    assert_eq!(config.pool.pool_size, 4);
    assert_eq!(config.keywords.max_keywords, 15);
    assert_eq!(config.processing.max_tags, 12);
    assert!(config.processing.strict_utf8);
    assert_eq!(config.limits.max_file_size_mb, 5.0);
    assert_eq!(config.limits.max_total_size_mb, 25.0);
    assert_eq!(config.limits.max_files_count, 40);
}

/// Empty files fall back to defaults.
#[test]
fn test_empty_toml_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("organizatext.toml");
    fs::write(&config_path, "").unwrap();

    let config = OrganizatextConfig::from_file(&config_path).unwrap();
    assert_eq!(config, OrganizatextConfig::default());
}

#[test]
fn test_yml_extension_is_yaml() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.yml");
    fs::write(&config_path, "keywords:\n  max_keywords: 3\n  stopwords: [informe]\n").unwrap();

    let config = OrganizatextConfig::from_file(&config_path).unwrap();
    assert_eq!(config.keywords.max_keywords, 3);
    assert_eq!(config.keywords.stopwords, Some(vec!["informe".to_string()]));
}

#[test]
fn test_invalid_json_is_validation_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.json");
    fs::write(&config_path, r#"{"pool": {"pool_size": "two"}}"#).unwrap();

    let err = OrganizatextConfig::from_file(&config_path).unwrap_err();
    assert!(matches!(err, OrganizatextError::Validation { .. }));
    assert!(err.to_string().contains("Invalid JSON"));
}

#[test]
fn test_negative_limits_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[limits]\nmax_total_size_mb = -1\n").unwrap();

    assert!(OrganizatextConfig::from_file(&config_path).is_err());
}

#[test]
#[serial]
fn test_discover_returns_none_without_file() {
    let temp_dir = TempDir::new().unwrap();
    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(temp_dir.path()).unwrap();

    let result = OrganizatextConfig::discover();

    std::env::set_current_dir(&original_dir).unwrap();

    // A stray organizatext.toml above the temp dir would be found; only the error case is fatal.
    assert!(result.is_ok());
}

#[test]
#[serial]
fn test_discover_in_current_dir() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("organizatext.toml"), "[processing]\nmax_tags = 7\n").unwrap();

    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(temp_dir.path()).unwrap();

    let result = OrganizatextConfig::discover();

    std::env::set_current_dir(&original_dir).unwrap();

    let config = result.unwrap().expect("config should be discovered");
    assert_eq!(config.processing.max_tags, 7);
}
