//! Per-series time offsets from query parameters.

use std::collections::HashMap;

use crate::error::{CalProxyError, CalProxyResult};

/// Recurrence id to signed minute offset.
pub type OffsetMap = HashMap<i64, i64>;

/// Start and end offsets requested by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Offsets {
    pub start: OffsetMap,
    pub end: OffsetMap,
}

impl Offsets {
    /// Parse `startOffset` and `endOffset` values. One malformed value fails
    /// the whole set. Repeated ids keep the last value.
    pub fn parse<S: AsRef<str>>(start: &[S], end: &[S]) -> CalProxyResult<Self> {
        Ok(Offsets {
            start: parse_map(start)?,
            end: parse_map(end)?,
        })
    }

    /// Offsets for one event; events without an integer id get zero.
    pub fn for_recurrence(&self, id: Option<i64>) -> (i64, i64) {
        match id {
            Some(id) => (
                self.start.get(&id).copied().unwrap_or(0),
                self.end.get(&id).copied().unwrap_or(0),
            ),
            None => (0, 0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_empty() && self.end.is_empty()
    }
}

fn parse_map<S: AsRef<str>>(values: &[S]) -> CalProxyResult<OffsetMap> {
    values
        .iter()
        .map(|v| parse_offset(v.as_ref()))
        .collect()
}

/// Parse `<recurrenceId><+|-><minutes>`, e.g. `583745+15` or `583745-30`.
pub fn parse_offset(value: &str) -> CalProxyResult<(i64, i64)> {
    let invalid = || CalProxyError::InvalidOffset(value.to_string());

    let value_trimmed = value.trim();
    let split = value_trimmed.find(['+', '-']).ok_or_else(invalid)?;
    let (id, minutes) = value_trimmed.split_at(split);

    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let digits = &minutes[1..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let id: i64 = id.parse().map_err(|_| invalid())?;
    let minutes: i64 = minutes.parse().map_err(|_| invalid())?;
    Ok((id, minutes))
}
