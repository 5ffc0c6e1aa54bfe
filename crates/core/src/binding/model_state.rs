// Model state
//
// Aggregated per-parameter validation outcomes for one request.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Error messages keyed by parameter (or property) name.
/// Serializes as a plain JSON object: `{"ids": ["..."]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelState {
    errors: BTreeMap<String, Vec<String>>,
}

impl ModelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no errors have been recorded.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record an error for `key`. Multiple errors per key are kept in order.
    pub fn add_model_error(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(key.into())
            .or_default()
            .push(message.into());
    }

    /// Total number of recorded errors across all keys.
    pub fn error_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    pub fn errors(&self, key: &str) -> Option<&[String]> {
        self.errors.get(key).map(Vec::as_slice)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.errors.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    /// Merge another state, prefixing its keys (e.g. `courses[0].`).
    pub fn merge_prefixed(&mut self, prefix: &str, other: ModelState) {
        for (key, messages) in other.errors {
            self.errors
                .entry(format!("{prefix}{key}"))
                .or_default()
                .extend(messages);
        }
    }
}
