//! Event title cleanup.
//!
//! Upstream titles look like
//! `Einführung in die Rechnerarchitektur (IN0004) VO, Standardgruppe`.
//! The rules below run in a fixed order; later rules assume the earlier ones
//! already removed the course tag and trailing location clause.

use std::sync::LazyLock;

use regex::Regex;

use crate::replacements::ReplacementTable;

/// Course tags like `(IN0001)` or `[MA2012]` and everything after them.
/// Mismatched brackets such as `[MA123)` are accepted as well.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r" ?[\[(](?:ED|MW|SOM|CIT|MA|IN|WI|WIB)[0-9]+(?:[_\-,]\s*[a-zA-Z0-9]+)*[\])].*")
        .expect("valid tag regex")
});

/// Location and instructor appended to language course titles.
static LOCATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r" ?(?:München|Garching|Weihenstephan).+").expect("valid location regex")
});

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s\s+").expect("valid whitespace regex"));

/// Numbers like `0000002467 ` in `0000002467 Semantik`.
static LEADING_DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+ ").expect("valid leading digits regex"));

/// Group labels, course type abbreviations and capacity notes.
const BOILERPLATE: &[&str] = &[
    "Standardgruppe",
    "PR",
    "VO",
    "FA",
    "VI",
    "TT",
    "UE",
    "SE",
    "(Limited places)",
    "(Online)",
];

/// Remove tags, locations and boilerplate without shortening course names.
pub fn strip(raw: &str) -> String {
    let summary = TAG_RE.replace(raw, "");
    let summary = LOCATION_RE.replace(&summary, "");
    let mut summary = WHITESPACE_RE.replace_all(&summary, " ").into_owned();

    for token in BOILERPLATE {
        if summary.contains(token) {
            summary = summary.replace(token, "");
        }
    }

    let summary = LEADING_DIGITS_RE.replace(&summary, "");
    tidy(&summary)
}

/// Full cleanup: [`strip`] followed by the replacement table.
pub fn clean(raw: &str, replacements: &ReplacementTable) -> String {
    replacements.apply(&strip(raw))
}

/// Collapse the gaps left by token removal and drop a trailing ` ,`.
fn tidy(summary: &str) -> String {
    let collapsed = WHITESPACE_RE.replace_all(summary, " ");
    let trimmed = collapsed.trim();
    trimmed
        .strip_suffix(" ,")
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}
