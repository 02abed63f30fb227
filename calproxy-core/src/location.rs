//! Room code extraction and building resolution.

use std::sync::LazyLock;

use regex::Regex;

use crate::buildings::BuildingDirectory;
use crate::constants::{ADDITIONAL_ROOMS_HEADER, NAV_ROOM_URL};

/// Room codes such as `(5612.03.017)`, `(5612.EG.017)` or `(5612.EG.010B)`.
static ROOM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[({](\d{4}\.[a-zA-Z0-9]{2}\.\d{3}[A-Z]?)[)}]").expect("valid room regex")
});

/// Where an event takes place, as far as the room codes tell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedLocation {
    /// Building address for the primary room, if the directory knows it
    pub building: Option<String>,
    pub primary_room: Option<String>,
    pub additional_rooms: Vec<String>,
}

impl ResolvedLocation {
    pub fn nav_link(&self) -> Option<String> {
        self.primary_room.as_deref().map(room_link)
    }

    /// `Additional rooms:` followed by one `<code>: <link>` line per room.
    pub fn additional_rooms_block(&self) -> Option<String> {
        if self.additional_rooms.is_empty() {
            return None;
        }
        let mut block = ADDITIONAL_ROOMS_HEADER.to_string();
        for room in &self.additional_rooms {
            block.push('\n');
            block.push_str(room);
            block.push_str(": ");
            block.push_str(&room_link(room));
        }
        Some(block)
    }
}

pub fn room_link(code: &str) -> String {
    format!("{NAV_ROOM_URL}{code}")
}

/// All room codes in `location`, or in `description` if the location has none.
pub fn room_codes(location: &str, description: &str) -> Vec<String> {
    let from_location = extract(location);
    if from_location.is_empty() {
        extract(description)
    } else {
        from_location
    }
}

fn extract(text: &str) -> Vec<String> {
    ROOM_RE
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Resolve the primary room and building. `extra_rooms` are rooms folded
/// in from duplicate events; they join the additional rooms unless they
/// repeat a room that is already listed.
pub fn resolve(
    location: &str,
    description: &str,
    extra_rooms: &[String],
    buildings: &BuildingDirectory,
) -> ResolvedLocation {
    let mut codes = room_codes(location, description).into_iter();
    let Some(primary) = codes.next() else {
        return ResolvedLocation {
            additional_rooms: dedup_rooms(extra_rooms.iter().cloned(), None),
            ..Default::default()
        };
    };

    let building = buildings.resolve(&primary[..4]).map(str::to_string);
    let additional_rooms = dedup_rooms(codes.chain(extra_rooms.iter().cloned()), Some(&primary));

    ResolvedLocation {
        building,
        primary_room: Some(primary),
        additional_rooms,
    }
}

fn dedup_rooms(rooms: impl Iterator<Item = String>, primary: Option<&str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for room in rooms {
        if Some(room.as_str()) == primary || seen.contains(&room) {
            continue;
        }
        seen.push(room);
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn directory() -> BuildingDirectory {
        BuildingDirectory::new(HashMap::from([
            ("5508".to_string(), "Boltzmannstr. 15".to_string()),
            ("5612".to_string(), "Boltzmannstr. 3".to_string()),
        ]))
    }

    #[test]
    fn test_single_room_resolves_building_and_link() {
        let resolved = resolve(
            "MW 1801, Ernst-Schmidt-Hörsaal (5508.02.801)",
            "",
            &[],
            &directory(),
        );

        assert_eq!(resolved.building.as_deref(), Some("Boltzmannstr. 15"));
        assert_eq!(
            resolved.nav_link().as_deref(),
            Some("https://nav.tum.de/room/5508.02.801")
        );
        assert_eq!(resolved.additional_rooms_block(), None);
    }

    #[test]
    fn test_room_code_variants() {
        assert_eq!(
            room_codes("A (5612.EG.010B), B {5612.03.017}, C (5612.U1.001)", ""),
            vec!["5612.EG.010B", "5612.03.017", "5612.U1.001"]
        );
        assert!(room_codes("Room 5612.01.001", "").is_empty());
    }

    #[test]
    fn test_subsequent_rooms_become_additional() {
        let resolved = resolve(
            "Hörsaal 1 (5508.02.801), Hörsaal 2 (5612.01.001)",
            "",
            &[],
            &directory(),
        );

        assert_eq!(resolved.primary_room.as_deref(), Some("5508.02.801"));
        assert_eq!(
            resolved.additional_rooms_block().as_deref(),
            Some("Additional rooms:\n5612.01.001: https://nav.tum.de/room/5612.01.001")
        );
    }

    #[test]
    fn test_falls_back_to_description() {
        let resolved = resolve("Online", "Ersatzraum (5612.01.001)", &[], &directory());
        assert_eq!(resolved.primary_room.as_deref(), Some("5612.01.001"));
        assert_eq!(resolved.building.as_deref(), Some("Boltzmannstr. 3"));
    }

    #[test]
    fn test_unknown_building_still_links() {
        let resolved = resolve("Raum (9999.01.001)", "", &[], &directory());
        assert_eq!(resolved.building, None);
        assert!(resolved.nav_link().is_some());
    }

    #[test]
    fn test_no_room_code_means_no_enrichment() {
        let resolved = resolve("Zoom", "irgendwo", &[], &directory());
        assert_eq!(resolved, ResolvedLocation::default());
    }

    #[test]
    fn test_extra_rooms_skip_primary_and_repeats() {
        let extra = vec![
            "5508.02.801".to_string(),
            "5612.01.001".to_string(),
            "5612.01.001".to_string(),
        ];
        let resolved = resolve("(5508.02.801)", "", &extra, &directory());
        assert_eq!(resolved.additional_rooms, vec!["5612.01.001"]);
    }
}
