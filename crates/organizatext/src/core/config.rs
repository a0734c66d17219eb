//! Configuration loading and management.
//!
//! [`OrganizatextConfig`] groups every tunable of the library. It can be loaded from
//! TOML, YAML or JSON files, discovered in the directory hierarchy, or built in code.

use crate::keywords::KeywordConfig;
use crate::validation::LimitsConfig;
use crate::{OrganizatextError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the file searched by [`OrganizatextConfig::discover`].
pub const CONFIG_FILE_NAME: &str = "organizatext.toml";

/// Main configuration.
///
/// # Example
///
/// ```rust
/// use organizatext::core::config::OrganizatextConfig;
///
/// let config = OrganizatextConfig::default();
/// assert_eq!(config.pool.pool_size, 2);
/// assert_eq!(config.keywords.max_keywords, 10);
///
/// // let config = OrganizatextConfig::from_toml_file("organizatext.toml")?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizatextConfig {
    #[serde(default)]
    pub pool: PoolConfig,

    #[serde(default)]
    pub keywords: KeywordConfig,

    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Upload limits used by [`crate::validation`].
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Worker pool configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Number of background workers (default: 2).
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            pool_size: default_pool_size(),
        }
    }
}

/// Per-file processing options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Maximum number of tags kept per file (default: 20).
    #[serde(default = "default_max_tags")]
    pub max_tags: usize,

    /// Fail files that are not valid UTF-8 instead of decoding them lossily.
    #[serde(default)]
    pub strict_utf8: bool,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            max_tags: default_max_tags(),
            strict_utf8: false,
        }
    }
}

fn default_pool_size() -> usize {
    2
}

fn default_max_tags() -> usize {
    20
}

impl OrganizatextConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            OrganizatextError::validation(format!("Invalid TOML in {}: {}", path.as_ref().display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;
        let config: Self = serde_yaml_ng::from_str(&content).map_err(|e| {
            OrganizatextError::validation(format!("Invalid YAML in {}: {}", path.as_ref().display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            OrganizatextError::validation(format!("Invalid JSON in {}: {}", path.as_ref().display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, picking the format from the file extension.
    ///
    /// `.toml`, `.yaml`/`.yml` and `.json` are supported.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("toml") => Self::from_toml_file(path),
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(OrganizatextError::validation(format!(
                "Unsupported config file format: {} (expected .toml, .yaml, .yml or .json)",
                path.display()
            ))),
        }
    }

    /// Discover configuration file in parent directories.
    ///
    /// Searches for `organizatext.toml` in the current directory and its parents.
    ///
    /// # Returns
    ///
    /// - `Some(config)` if found
    /// - `None` if no config file found
    pub fn discover() -> Result<Option<Self>> {
        let mut current = std::env::current_dir().map_err(OrganizatextError::Io)?;

        loop {
            let candidate = current.join(CONFIG_FILE_NAME);
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "Discovered configuration file");
                return Ok(Some(Self::from_toml_file(candidate)?));
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }

    /// Reject values the library cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.pool.pool_size == 0 {
            return Err(OrganizatextError::validation("pool.pool_size must be at least 1"));
        }
        self.limits.validate()
    }

    /// Render the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn read_config(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        OrganizatextError::validation_with_source(format!("Failed to read config file {}: {}", path.display(), e), e)
    })
}
