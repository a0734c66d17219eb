//! Optional named-entity recognition.
//!
//! Entity recognition is a pluggable capability: a [`crate::processor::FileProcessor`]
//! is built either with a recognizer or without one. When present, the recognizer
//! is initialized on first use; if initialization or recognition fails the file is
//! still processed and simply gets no entities.

mod heuristic;

pub use heuristic::HeuristicRecognizer;

use crate::Result;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Category of a recognized entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Person,
    Place,
    Organization,
    Date,
}

/// A named entity found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub value: String,
}

impl Entity {
    pub fn new(kind: EntityKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// A named-entity recognizer.
///
/// Implementations must be `Send + Sync`; one instance is shared by every worker
/// of a pool.
pub trait EntityRecognizer: Send + Sync {
    /// Identifier used in logs.
    fn name(&self) -> &str;

    /// Load models or other resources. Called at most once per worker, before the
    /// first [`recognize`](Self::recognize).
    fn initialize(&self) -> Result<()> {
        Ok(())
    }

    /// Find entities in `text`, grouped by kind in the order person, place,
    /// organization, date.
    fn recognize(&self, text: &str) -> Result<Vec<Entity>>;
}

/// Per-worker wrapper that initializes the recognizer lazily and caches the result.
pub(crate) struct EntityStage {
    recognizer: Option<Arc<dyn EntityRecognizer>>,
    ready: OnceCell<bool>,
}

impl EntityStage {
    pub(crate) fn new(recognizer: Option<Arc<dyn EntityRecognizer>>) -> Self {
        Self {
            recognizer,
            ready: OnceCell::new(),
        }
    }

    pub(crate) fn recognizer(&self) -> Option<&Arc<dyn EntityRecognizer>> {
        self.recognizer.as_ref()
    }

    pub(crate) fn is_present(&self) -> bool {
        self.recognizer.is_some()
    }

    pub(crate) fn recognize(&self, text: &str) -> Vec<Entity> {
        let Some(recognizer) = &self.recognizer else {
            return Vec::new();
        };

        let ready = *self.ready.get_or_init(|| match recognizer.initialize() {
            Ok(()) => {
                tracing::debug!(recognizer = recognizer.name(), "Entity recognizer initialized");
                true
            }
            Err(e) => {
                tracing::warn!(
                    recognizer = recognizer.name(),
                    "Entity recognizer unavailable, continuing without entities: {}",
                    e
                );
                false
            }
        });

        if !ready {
            return Vec::new();
        }

        match recognizer.recognize(text) {
            Ok(entities) => entities,
            Err(e) => {
                tracing::warn!(recognizer = recognizer.name(), "Entity recognition failed: {}", e);
                Vec::new()
            }
        }
    }
}
