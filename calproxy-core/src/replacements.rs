//! Course name shortening.
//!
//! The source mapping is an unordered JSON object. It is turned into a list
//! sorted by descending key length, then key, then value, so that a longer
//! pattern always runs before any of its substrings and the result does not
//! depend on map iteration order.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::error::{CalProxyError, CalProxyResult};

/// A single literal substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub key: String,
    pub value: String,
}

impl Replacement {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Replacement {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Ord for Replacement {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .len()
            .cmp(&self.key.len())
            .then_with(|| self.key.cmp(&other.key))
            .then_with(|| self.value.cmp(&other.value))
    }
}

impl PartialOrd for Replacement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Ordered, immutable set of title substitutions.
#[derive(Debug, Clone, Default)]
pub struct ReplacementTable {
    entries: Vec<Replacement>,
}

impl ReplacementTable {
    pub fn build(mapping: HashMap<String, String>) -> Self {
        let mut entries: Vec<Replacement> = mapping
            .into_iter()
            .map(|(key, value)| Replacement { key, value })
            .collect();
        entries.sort();
        ReplacementTable { entries }
    }

    /// Parse a JSON object of `"long name": "short name"` pairs.
    pub fn from_json(json: &str) -> CalProxyResult<Self> {
        let mapping: HashMap<String, String> = serde_json::from_str(json)
            .map_err(|e| CalProxyError::Config(format!("Invalid course replacements: {e}")))?;
        Ok(Self::build(mapping))
    }

    pub fn entries(&self) -> &[Replacement] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn apply(&self, text: &str) -> String {
        let mut result = text.to_string();
        for replacement in &self.entries {
            if replacement.key.is_empty() {
                continue;
            }
            if result.contains(&replacement.key) {
                result = result.replace(&replacement.key, &replacement.value);
            }
        }
        result
    }
}
