//! Parsed feed representation.
//!
//! A feed is an ordered list of components. Events are parsed into
//! [`Event`]; everything else (time zones, metadata) is kept as an opaque
//! [`RawComponent`] and written back exactly as it came in.

use crate::event::Event;

/// A property as it appeared upstream. TEXT values are kept escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawProperty {
    pub name: String,
    pub params: Vec<RawParameter>,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawParameter {
    pub key: String,
    pub value: Option<String>,
}

impl RawProperty {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        RawProperty {
            name: name.into(),
            params: Vec::new(),
            value: value.into(),
        }
    }

    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.key.eq_ignore_ascii_case(key))
            .and_then(|p| p.value.as_deref())
    }

    /// Parameters and value as written, e.g. `;TZID=Europe/Berlin:20240109T170000`.
    pub fn literal(&self) -> String {
        let mut out = String::new();
        for param in &self.params {
            out.push(';');
            out.push_str(&param.key);
            if let Some(ref value) = param.value {
                out.push('=');
                out.push_str(&quote_param(value));
            }
        }
        out.push(':');
        out.push_str(&self.value);
        out
    }
}

/// Parameter values containing separators must be quoted (RFC 5545 §3.1).
fn quote_param(value: &str) -> String {
    let already_quoted = value.len() >= 2 && value.starts_with('"') && value.ends_with('"');
    if !already_quoted && value.contains([':', ';', ',']) {
        format!("\"{value}\"")
    } else {
        value.to_string()
    }
}

/// Any component the pipeline does not interpret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawComponent {
    pub name: String,
    pub properties: Vec<RawProperty>,
    pub components: Vec<RawComponent>,
}

/// One record of a feed.
#[derive(Debug, Clone)]
pub enum FeedComponent {
    Event(Event),
    Other(RawComponent),
}

impl FeedComponent {
    pub fn as_event(&self) -> Option<&Event> {
        match self {
            FeedComponent::Event(event) => Some(event),
            FeedComponent::Other(_) => None,
        }
    }
}

/// A whole calendar: top-level properties and ordered components.
#[derive(Debug, Clone, Default)]
pub struct Feed {
    pub properties: Vec<RawProperty>,
    pub components: Vec<FeedComponent>,
}

impl Feed {
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.components.iter().filter_map(FeedComponent::as_event)
    }

    pub fn event_count(&self) -> usize {
        self.events().count()
    }

    /// Serialize to iCalendar text (CRLF line endings, folded lines).
    pub fn to_ics(&self) -> String {
        crate::ics::write_feed(self)
    }
}
