//! Lookup tables loaded once at startup.

use std::path::Path;

use crate::buildings::BuildingDirectory;
use crate::constants::{EMBEDDED_BUILDINGS, EMBEDDED_COURSES};
use crate::error::{CalProxyError, CalProxyResult};
use crate::replacements::ReplacementTable;

/// Replacement table and building directory. Immutable after construction
/// and shared between requests.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub replacements: ReplacementTable,
    pub buildings: BuildingDirectory,
}

impl Tables {
    /// Tables compiled into the binary.
    pub fn embedded() -> CalProxyResult<Self> {
        Self::from_json(EMBEDDED_COURSES, EMBEDDED_BUILDINGS)
    }

    pub fn from_json(courses: &str, buildings: &str) -> CalProxyResult<Self> {
        Ok(Tables {
            replacements: ReplacementTable::from_json(courses)?,
            buildings: BuildingDirectory::from_json(buildings)?,
        })
    }

    /// Load tables, reading overrides from disk where given and falling back
    /// to the embedded data otherwise.
    pub fn load(courses: Option<&Path>, buildings: Option<&Path>) -> CalProxyResult<Self> {
        let courses = match courses {
            Some(path) => read_table(path)?,
            None => EMBEDDED_COURSES.to_string(),
        };
        let buildings = match buildings {
            Some(path) => read_table(path)?,
            None => EMBEDDED_BUILDINGS.to_string(),
        };
        Self::from_json(&courses, &buildings)
    }
}

fn read_table(path: &Path) -> CalProxyResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| CalProxyError::Config(format!("Could not read {}: {e}", path.display())))
}
