//! Feed parsing using the icalendar crate's parser.

use icalendar::ValueType;
use icalendar::parser::{Component, Property, read_calendar, unfold};

use crate::constants::RECURRENCE_ID_PROPERTY;
use crate::error::{CalProxyError, CalProxyResult};
use crate::event::{Event, TimeProperty};
use crate::feed::{Feed, FeedComponent, RawComponent, RawParameter, RawProperty};
use crate::ics::text::{escape, escape_list};

/// Parse raw feed bytes. Anything that is not a well-formed calendar fails
/// as a whole; nothing is salvaged.
pub fn parse_feed(bytes: &[u8]) -> CalProxyResult<Feed> {
    let content = std::str::from_utf8(bytes)
        .map_err(|e| CalProxyError::IcsParse(format!("feed is not valid UTF-8: {e}")))?;
    parse_feed_str(content)
}

pub fn parse_feed_str(content: &str) -> CalProxyResult<Feed> {
    let head = content.trim_start_matches('\u{feff}').trim_start();
    if !head
        .get(..15)
        .is_some_and(|h| h.eq_ignore_ascii_case("BEGIN:VCALENDAR"))
    {
        return Err(CalProxyError::IcsParse("missing BEGIN:VCALENDAR".into()));
    }

    let unfolded = unfold(content);
    let calendar =
        read_calendar(&unfolded).map_err(|e| CalProxyError::IcsParse(e.to_string()))?;

    let properties = calendar.properties.iter().map(to_raw_property).collect();
    let components = calendar
        .components
        .iter()
        .map(|component| {
            if component.name.as_ref().eq_ignore_ascii_case("VEVENT") {
                FeedComponent::Event(to_event(component))
            } else {
                FeedComponent::Other(to_raw_component(component))
            }
        })
        .collect();

    Ok(Feed {
        properties,
        components,
    })
}

// TEXT-typed properties as the icalendar parser types them; their values
// arrive unescaped.
const TEXT_PROPERTIES: &[&str] = &[
    "ACTION",
    "CALSCALE",
    "CATEGORIES",
    "CLASS",
    "COMMENT",
    "CONTACT",
    "DESCRIPTION",
    "LOCATION",
    "METHOD",
    "PRODID",
    "RELATED-TO",
    "REQUEST-STATUS",
    "RESOURCES",
    "STATUS",
    "SUMMARY",
    "TRANSP",
    "TZID",
    "TZNAME",
    "UID",
    "VERSION",
];

// Comma separates list items in these, so it is left bare.
const TEXT_LIST_PROPERTIES: &[&str] = &["CATEGORIES", "RESOURCES"];

/// Pull the fields the pipeline works on out of a VEVENT. Missing text
/// fields become empty strings.
fn to_event(component: &Component) -> Event {
    let mut event = Event::default();

    for prop in &component.properties {
        let name = prop.name.as_str().to_ascii_uppercase();
        match name.as_str() {
            "SUMMARY" => event.summary = prop.val.to_string(),
            "DESCRIPTION" => event.description = prop.val.to_string(),
            "LOCATION" => event.location = prop.val.to_string(),
            "DTSTART" => event.start = Some(TimeProperty::from_raw(to_raw_property(prop))),
            "DTEND" => event.end = Some(TimeProperty::from_raw(to_raw_property(prop))),
            "STATUS" => event.status_token = Some(prop.val.to_string()),
            _ => {
                let raw = to_raw_property(prop);
                if raw.is(RECURRENCE_ID_PROPERTY) {
                    event.recurrence_id = Some(prop.val.as_str().trim().to_string());
                }
                event.properties.push(raw);
            }
        }
    }

    event.components = component.components.iter().map(to_raw_component).collect();
    event
}

fn to_raw_component(component: &Component) -> RawComponent {
    RawComponent {
        name: component.name.to_string(),
        properties: component.properties.iter().map(to_raw_property).collect(),
        components: component.components.iter().map(to_raw_component).collect(),
    }
}

/// Whether the parser unescaped this property's value. A `VALUE`
/// parameter wins over the property name.
fn is_text_valued(prop: &Property) -> bool {
    let declared = prop
        .params
        .iter()
        .find(|p| p.key.as_str() == "VALUE")
        .and_then(|p| p.val.as_ref())
        .and_then(|v| v.as_str().parse::<ValueType>().ok());
    if let Some(value_type) = declared {
        return value_type == ValueType::Text;
    }

    let name = prop.name.as_str();
    // lowercase names are left untyped by the parser
    if name.chars().any(char::is_lowercase) {
        return false;
    }
    name.starts_with("X-") || TEXT_PROPERTIES.contains(&name)
}

/// Raw form of a property with its value escaped again as it was upstream.
fn to_raw_property(prop: &Property) -> RawProperty {
    let value = if !is_text_valued(prop) {
        prop.val.to_string()
    } else if TEXT_LIST_PROPERTIES.contains(&prop.name.as_str()) {
        escape_list(prop.val.as_str())
    } else {
        escape(prop.val.as_str())
    };

    RawProperty {
        name: prop.name.to_string(),
        params: prop
            .params
            .iter()
            .map(|p| RawParameter {
                key: p.key.to_string(),
                value: p.val.as_ref().map(|v| v.to_string()),
            })
            .collect(),
        value,
    }
}
