//! Calendar event types.

use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::feed::{RawComponent, RawProperty};

/// A scheduled occurrence from the upstream feed.
///
/// Text fields hold unescaped values. Properties the pipeline does not touch
/// are kept in `properties` and sub-components (alarms) in `components`, both
/// in their original order.
#[derive(Debug, Clone, Default)]
pub struct Event {
    pub summary: String,
    pub description: String,
    pub location: String,
    pub start: Option<TimeProperty>,
    pub end: Option<TimeProperty>,
    /// STATUS token as sent upstream, mapped onto `status` during normalization
    pub status_token: Option<String>,
    pub status: EventStatus,
    /// Series identifier (`X-CO-RECURRINGID`), opaque
    pub recurrence_id: Option<String>,
    pub properties: Vec<RawProperty>,
    pub components: Vec<RawComponent>,
}

impl Event {
    /// Identity used to collapse duplicates: title plus the raw DTSTART literal.
    pub fn dedup_key(&self) -> String {
        let start = self
            .start
            .as_ref()
            .map(|s| s.raw.literal())
            .unwrap_or_default();
        format!("{}-{}", self.summary, start)
    }

    /// The recurrence identifier, if it is an integer.
    pub fn recurrence_number(&self) -> Option<i64> {
        self.recurrence_id
            .as_deref()
            .and_then(|id| id.trim().parse().ok())
    }

    pub fn start_time(&self) -> Option<&EventTime> {
        self.start.as_ref().and_then(|s| s.time.as_ref())
    }

    pub fn end_time(&self) -> Option<&EventTime> {
        self.end.as_ref().and_then(|s| s.time.as_ref())
    }
}

/// DTSTART / DTEND: the raw property plus its parsed value, if parseable.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeProperty {
    pub raw: RawProperty,
    pub time: Option<EventTime>,
}

impl TimeProperty {
    pub fn from_raw(raw: RawProperty) -> Self {
        let time = EventTime::from_property(&raw);
        TimeProperty { raw, time }
    }

    /// Move a date-time by `minutes`. Returns false for date-only or
    /// unparseable values, which are left untouched.
    pub fn shift(&mut self, minutes: i64) -> bool {
        let Some(shifted) = self.time.as_ref().and_then(|t| t.shifted(minutes)) else {
            return false;
        };
        self.raw.value = shifted.ics_value();
        self.time = Some(shifted);
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventTime {
    Date(NaiveDate),
    DateTimeUtc(DateTime<Utc>),
    DateTimeFloating(NaiveDateTime),
    DateTimeZoned { datetime: NaiveDateTime, tzid: String },
}

impl EventTime {
    /// Parse a DTSTART/DTEND-style property.
    ///
    /// Handles:
    /// - VALUE=DATE: `DTSTART;VALUE=DATE:20240108`
    /// - TZID parameter: `DTSTART;TZID=Europe/Berlin:20240108T100000`
    /// - UTC: `DTSTART:20240108T100000Z`
    /// - Floating: `DTSTART:20240108T100000`
    pub fn from_property(prop: &RawProperty) -> Option<Self> {
        let value = prop.value.trim();
        let is_date = prop
            .param("VALUE")
            .is_some_and(|v| v.eq_ignore_ascii_case("DATE"))
            || (value.len() == 8 && !value.contains('T'));

        if is_date {
            return NaiveDate::parse_from_str(value, "%Y%m%d")
                .ok()
                .map(EventTime::Date);
        }

        if let Some(utc) = value.strip_suffix('Z') {
            return NaiveDateTime::parse_from_str(utc, "%Y%m%dT%H%M%S")
                .ok()
                .map(|dt| EventTime::DateTimeUtc(dt.and_utc()));
        }

        let datetime = NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%S").ok()?;
        Some(match prop.param("TZID") {
            Some(tzid) => EventTime::DateTimeZoned {
                datetime,
                tzid: tzid.to_string(),
            },
            None => EventTime::DateTimeFloating(datetime),
        })
    }

    /// Value part of the property in iCalendar notation.
    pub fn ics_value(&self) -> String {
        match self {
            EventTime::Date(d) => d.format("%Y%m%d").to_string(),
            EventTime::DateTimeUtc(dt) => dt.format("%Y%m%dT%H%M%SZ").to_string(),
            EventTime::DateTimeFloating(dt) => dt.format("%Y%m%dT%H%M%S").to_string(),
            EventTime::DateTimeZoned { datetime, .. } => datetime.format("%Y%m%dT%H%M%S").to_string(),
        }
    }

    /// Shifted copy; `None` for date-only values.
    pub fn shifted(&self, minutes: i64) -> Option<Self> {
        let delta = Duration::try_minutes(minutes)?;
        match self {
            EventTime::Date(_) => None,
            EventTime::DateTimeUtc(dt) => dt.checked_add_signed(delta).map(EventTime::DateTimeUtc),
            EventTime::DateTimeFloating(dt) => dt
                .checked_add_signed(delta)
                .map(EventTime::DateTimeFloating),
            EventTime::DateTimeZoned { datetime, tzid } => {
                datetime
                    .checked_add_signed(delta)
                    .map(|datetime| EventTime::DateTimeZoned {
                        datetime,
                        tzid: tzid.clone(),
                    })
            }
        }
    }

    /// RFC 3339 rendering. Zoned times resolve their TZID through chrono-tz;
    /// unknown zones and floating times are rendered without an offset.
    pub fn to_rfc3339(&self) -> String {
        match self {
            EventTime::Date(d) => d.format("%Y-%m-%d").to_string(),
            EventTime::DateTimeUtc(dt) => dt.to_rfc3339_opts(SecondsFormat::Secs, true),
            EventTime::DateTimeFloating(dt) => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
            EventTime::DateTimeZoned { datetime, tzid } => tzid
                .parse::<chrono_tz::Tz>()
                .ok()
                .and_then(|tz| tz.from_local_datetime(datetime).earliest())
                .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
                .unwrap_or_else(|| datetime.format("%Y-%m-%dT%H:%M:%S").to_string()),
        }
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventStatus {
    Confirmed,
    Cancelled,
    Tentative,
    #[default]
    Unset,
}

impl EventStatus {
    pub fn from_ics_str(token: &str) -> Self {
        match token.trim() {
            "CONFIRMED" => EventStatus::Confirmed,
            "CANCELLED" => EventStatus::Cancelled,
            "TENTATIVE" => EventStatus::Tentative,
            _ => EventStatus::Unset,
        }
    }

    pub fn as_ics_str(&self) -> Option<&'static str> {
        match self {
            EventStatus::Confirmed => Some("CONFIRMED"),
            EventStatus::Cancelled => Some("CANCELLED"),
            EventStatus::Tentative => Some("TENTATIVE"),
            EventStatus::Unset => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::RawParameter;

    fn prop(value: &str, params: &[(&str, &str)]) -> RawProperty {
        RawProperty {
            name: "DTSTART".to_string(),
            params: params
                .iter()
                .map(|(k, v)| RawParameter {
                    key: k.to_string(),
                    value: Some(v.to_string()),
                })
                .collect(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_parse_variants() {
        assert!(matches!(
            EventTime::from_property(&prop("20240109T170000Z", &[])),
            Some(EventTime::DateTimeUtc(_))
        ));
        assert!(matches!(
            EventTime::from_property(&prop("20240109T170000", &[])),
            Some(EventTime::DateTimeFloating(_))
        ));
        assert!(matches!(
            EventTime::from_property(&prop("20240109", &[("VALUE", "DATE")])),
            Some(EventTime::Date(_))
        ));
        match EventTime::from_property(&prop("20240109T170000", &[("TZID", "Europe/Berlin")])) {
            Some(EventTime::DateTimeZoned { tzid, .. }) => assert_eq!(tzid, "Europe/Berlin"),
            other => panic!("Expected DateTimeZoned, got {:?}", other),
        }
        assert_eq!(EventTime::from_property(&prop("garbage", &[])), None);
    }

    #[test]
    fn test_shift_utc_by_minutes() {
        let mut start = TimeProperty::from_raw(prop("20240109T170000Z", &[]));
        assert!(start.shift(15));
        assert_eq!(start.raw.value, "20240109T171500Z");
        assert_eq!(
            start.time.as_ref().map(EventTime::to_rfc3339).as_deref(),
            Some("2024-01-09T17:15:00Z")
        );
    }

    #[test]
    fn test_shift_negative_crosses_midnight() {
        let mut start = TimeProperty::from_raw(prop("20240110T000500", &[("TZID", "Europe/Berlin")]));
        assert!(start.shift(-10));
        assert_eq!(start.raw.value, "20240109T235500");
        assert_eq!(start.raw.param("TZID"), Some("Europe/Berlin"));
    }

    #[test]
    fn test_date_only_is_not_shifted() {
        let mut start = TimeProperty::from_raw(prop("20240109", &[("VALUE", "DATE")]));
        assert!(!start.shift(30));
        assert_eq!(start.raw.value, "20240109");
    }

    #[test]
    fn test_zoned_rfc3339_uses_offset() {
        let time = EventTime::DateTimeZoned {
            datetime: NaiveDate::from_ymd_opt(2024, 1, 9)
                .unwrap()
                .and_hms_opt(17, 0, 0)
                .unwrap(),
            tzid: "Europe/Berlin".to_string(),
        };
        assert_eq!(time.to_rfc3339(), "2024-01-09T17:00:00+01:00");
    }

    #[test]
    fn test_status_tokens() {
        assert_eq!(EventStatus::from_ics_str("CONFIRMED"), EventStatus::Confirmed);
        assert_eq!(EventStatus::from_ics_str("CANCELLED"), EventStatus::Cancelled);
        assert_eq!(EventStatus::from_ics_str("TENTATIVE"), EventStatus::Tentative);
        assert_eq!(EventStatus::from_ics_str("MAYBE"), EventStatus::Unset);
        assert_eq!(EventStatus::Unset.as_ics_str(), None);
    }

    #[test]
    fn test_dedup_key_uses_raw_start_literal() {
        let event = Event {
            summary: "Intro".to_string(),
            start: Some(TimeProperty::from_raw(prop("20240109T170000Z", &[]))),
            ..Default::default()
        };
        assert_eq!(event.dedup_key(), "Intro-:20240109T170000Z");
    }
}
