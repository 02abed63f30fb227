//! Feed serialization.
//!
//! Non-event components and untouched properties are written back from
//! their raw form. Lines use CRLF and are folded at 75 octets.

use crate::event::Event;
use crate::feed::{Feed, FeedComponent, RawComponent, RawProperty};
use crate::ics::text::escape;

const MAX_LINE_OCTETS: usize = 75;

pub fn write_feed(feed: &Feed) -> String {
    let mut out = String::new();
    push_line(&mut out, "BEGIN:VCALENDAR");
    for prop in &feed.properties {
        push_property(&mut out, prop);
    }
    for component in &feed.components {
        match component {
            FeedComponent::Event(event) => write_event(&mut out, event),
            FeedComponent::Other(raw) => write_raw_component(&mut out, raw),
        }
    }
    push_line(&mut out, "END:VCALENDAR");
    out
}

fn write_event(out: &mut String, event: &Event) {
    push_line(out, "BEGIN:VEVENT");

    for prop in &event.properties {
        push_property(out, prop);
    }

    push_text(out, "SUMMARY", &event.summary);
    if !event.description.is_empty() {
        push_text(out, "DESCRIPTION", &event.description);
    }
    if !event.location.is_empty() {
        push_text(out, "LOCATION", &event.location);
    }
    if let Some(ref start) = event.start {
        push_property(out, &start.raw);
    }
    if let Some(ref end) = event.end {
        push_property(out, &end.raw);
    }
    if let Some(status) = event.status.as_ics_str() {
        push_line(out, &format!("STATUS:{status}"));
    }

    for component in &event.components {
        write_raw_component(out, component);
    }

    push_line(out, "END:VEVENT");
}

fn write_raw_component(out: &mut String, component: &RawComponent) {
    push_line(out, &format!("BEGIN:{}", component.name));
    for prop in &component.properties {
        push_property(out, prop);
    }
    for child in &component.components {
        write_raw_component(out, child);
    }
    push_line(out, &format!("END:{}", component.name));
}

fn push_text(out: &mut String, name: &str, value: &str) {
    push_line(out, &format!("{name}:{}", escape(value)));
}

fn push_property(out: &mut String, prop: &RawProperty) {
    push_line(out, &format!("{}{}", prop.name, prop.literal()));
}

/// Append a content line, folding it so no physical line exceeds
/// 75 octets. Folds never split a UTF-8 sequence.
fn push_line(out: &mut String, line: &str) {
    let mut budget = MAX_LINE_OCTETS;
    let mut used = 0;
    for c in line.chars() {
        let width = c.len_utf8();
        if used + width > budget {
            out.push_str("\r\n ");
            // the leading space counts against the continuation line
            budget = MAX_LINE_OCTETS - 1;
            used = 0;
        }
        out.push(c);
        used += width;
    }
    out.push_str("\r\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ics::parse::parse_feed_str;

    #[test]
    fn test_long_lines_are_folded() {
        let mut out = String::new();
        let line = format!("DESCRIPTION:{}", "ä".repeat(60));
        push_line(&mut out, &line);

        for physical in out.split("\r\n").filter(|l| !l.is_empty()) {
            assert!(physical.len() <= 75, "line too long: {} octets", physical.len());
        }
        let unfolded = out.replace("\r\n ", "");
        assert_eq!(unfolded.trim_end(), line);
    }

    #[test]
    fn test_write_preserves_other_components_verbatim() {
        let ics = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//TUMonline//EN\r\n\
BEGIN:VTIMEZONE\r\n\
TZID:Europe/Berlin\r\n\
END:VTIMEZONE\r\n\
BEGIN:VEVENT\r\n\
UID:1@tum\r\n\
SUMMARY:Intro\\, Part 1\r\n\
DTSTART:20240109T170000Z\r\n\
STATUS:CONFIRMED\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let feed = parse_feed_str(ics).expect("Should parse");
        let written = write_feed(&feed);

        assert!(written.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//TUMonline//EN\r\n"));
        assert!(written.contains("BEGIN:VTIMEZONE\r\nTZID:Europe/Berlin\r\nEND:VTIMEZONE\r\n"));
        assert!(written.contains("SUMMARY:Intro\\, Part 1\r\n"));
        assert!(written.contains("DTSTART:20240109T170000Z\r\n"));
        assert!(written.ends_with("END:VEVENT\r\nEND:VCALENDAR\r\n"));
        // STATUS is only emitted once normalization has mapped it
        assert!(!written.contains("STATUS:"));
    }

    #[test]
    fn test_pass_through_text_keeps_its_escapes() {
        let ics = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//TUM\\, Online//DE\r\n\
BEGIN:VEVENT\r\n\
UID:1@tum\r\n\
SUMMARY:A\\\\nB\\, C\r\n\
COMMENT:line one\\nline two\\, more\r\n\
CATEGORIES:Lecture,Exam\r\n\
DTSTART:20240109T170000Z\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let written = write_feed(&parse_feed_str(ics).expect("Should parse"));

        assert!(written.contains("PRODID:-//TUM\\, Online//DE\r\n"));
        assert!(written.contains("COMMENT:line one\\nline two\\, more\r\n"));
        assert!(written.contains("CATEGORIES:Lecture,Exam\r\n"));
        assert!(written.contains("SUMMARY:A\\\\nB\\, C\r\n"));
        // every line break is a CRLF content line ending
        assert!(!written.replace("\r\n", "").contains('\n'));
    }
}
