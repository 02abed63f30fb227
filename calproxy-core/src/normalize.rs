//! Per-event normalization.

use crate::event::{Event, EventStatus};
use crate::location;
use crate::summary;
use crate::tables::Tables;

/// Clean up a single event.
///
/// The description is rebuilt as, in order: additional rooms, the primary
/// room's navigation link, the original location (only when it was replaced
/// by a building address), the full course name, the original description
/// and any offset notes. Empty parts are skipped.
pub fn normalize(
    mut event: Event,
    tables: &Tables,
    start_offset: i64,
    end_offset: i64,
    extra_rooms: &[String],
) -> Event {
    let raw_summary = std::mem::take(&mut event.summary);
    let raw_description = std::mem::take(&mut event.description);
    let raw_location = event.location.clone();

    let mut offset_notes = Vec::new();
    if start_offset != 0 && event.start.as_mut().is_some_and(|s| s.shift(start_offset)) {
        offset_notes.push(format!("start offset: {start_offset}m"));
    }
    if end_offset != 0 && event.end.as_mut().is_some_and(|e| e.shift(end_offset)) {
        offset_notes.push(format!("end offset: {end_offset}m"));
    }

    event.summary = summary::clean(&raw_summary, &tables.replacements);
    let course_name = summary::strip(&raw_summary);

    let resolved = location::resolve(&raw_location, &raw_description, extra_rooms, &tables.buildings);

    let mut parts: Vec<String> = Vec::new();
    parts.extend(resolved.additional_rooms_block());
    parts.extend(resolved.nav_link());
    if let Some(building) = resolved.building {
        parts.push(raw_location);
        event.location = building;
    }
    parts.push(course_name);
    parts.push(raw_description);
    parts.extend(offset_notes);

    event.description = parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    event.status = event
        .status_token
        .as_deref()
        .map(EventStatus::from_ics_str)
        .unwrap_or_default();

    event
}
