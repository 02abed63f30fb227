//! Room-code prefix to building lookup.

use std::collections::HashMap;

use crate::error::{CalProxyError, CalProxyResult};

/// Maps the leading four digits of a room code (e.g. `5612` in
/// `5612.01.001`) to a human-readable building address.
#[derive(Debug, Clone, Default)]
pub struct BuildingDirectory {
    buildings: HashMap<String, String>,
}

impl BuildingDirectory {
    pub fn new(buildings: HashMap<String, String>) -> Self {
        BuildingDirectory { buildings }
    }

    pub fn from_json(json: &str) -> CalProxyResult<Self> {
        let buildings: HashMap<String, String> = serde_json::from_str(json)
            .map_err(|e| CalProxyError::Config(format!("Invalid building directory: {e}")))?;
        Ok(Self::new(buildings))
    }

    /// Exact-match lookup, no prefix or fuzzy matching.
    pub fn resolve(&self, code: &str) -> Option<&str> {
        self.buildings.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }
}
