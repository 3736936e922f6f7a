//! Inspection form draft persistence.
//!
//! The inspection window keeps its free-text findings and checkbox flags as
//! a local draft so nothing is lost between sittings. The draft lives under
//! its own cache key, read when the window opens and written when the user
//! saves; clearing the form removes the entry entirely.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::cache::{DRAFT_KEY, LocalCache};

/// A single drafted field: free text or a checkbox flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Text(String),
}

/// The drafted form contents, keyed by field identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Draft {
    fields: BTreeMap<String, FieldValue>,
}

impl Draft {
    /// Set a free-text field.
    pub fn set_text(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), FieldValue::Text(value.into()));
    }

    /// Set a checkbox field.
    pub fn set_flag(&mut self, field: impl Into<String>, value: bool) {
        self.fields.insert(field.into(), FieldValue::Flag(value));
    }

    /// A drafted text value, if the field was drafted as text.
    #[must_use]
    pub fn text(&self, field: &str) -> Option<&str> {
        match self.fields.get(field) {
            Some(FieldValue::Text(value)) => Some(value),
            _ => None,
        }
    }

    /// A drafted flag value, if the field was drafted as a checkbox.
    #[must_use]
    pub fn flag(&self, field: &str) -> Option<bool> {
        match self.fields.get(field) {
            Some(FieldValue::Flag(value)) => Some(*value),
            _ => None,
        }
    }

    /// Returns `true` when nothing has been drafted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Cache-backed store for the inspection form draft.
#[derive(Debug, Clone)]
pub struct DraftStore {
    cache: LocalCache,
}

impl DraftStore {
    /// Create a draft store over `cache`.
    #[must_use]
    pub const fn new(cache: LocalCache) -> Self {
        Self { cache }
    }

    /// Load the stored draft; missing or corrupt entries yield an empty one.
    #[must_use]
    pub fn load(&self) -> Draft {
        self.cache
            .read(DRAFT_KEY)
            .and_then(|raw| serde_json::from_value(raw).ok())
            .unwrap_or_default()
    }

    /// Persist the draft.
    pub fn save(&self, draft: &Draft) {
        self.cache.write(DRAFT_KEY, draft);
    }

    /// Drop the stored draft entirely.
    pub fn clear(&self) {
        self.cache.remove(DRAFT_KEY);
    }
}
