//! Distinct courses in a feed, for building hide/filter selections.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use crate::error::CalProxyResult;
use crate::feed::Feed;
use crate::ics::parse_feed;

/// A course as offered to the caller for hiding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub summary: String,
    pub hide: bool,
    pub recurrences: BTreeMap<String, CourseRecurrence>,
}

/// Time window of the first occurrence seen for one recurrence id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecurrence {
    pub recurring_id: String,
    pub dt_start: Option<String>,
    pub dt_end: Option<String>,
}

/// The title used to identify a course: the upstream summary, trimmed and
/// without a trailing ` ,` artifact.
pub fn course_title(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_suffix(" ,")
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}

pub fn list_courses(bytes: &[u8], hidden: &HashSet<String>) -> CalProxyResult<Vec<Course>> {
    Ok(courses_in(&parse_feed(bytes)?, hidden))
}

pub fn course_titles(bytes: &[u8]) -> CalProxyResult<Vec<String>> {
    Ok(courses_in(&parse_feed(bytes)?, &HashSet::new())
        .into_iter()
        .map(|c| c.summary)
        .collect())
}

/// Courses in first-seen order, deduplicated by raw title.
pub fn courses_in(feed: &Feed, hidden: &HashSet<String>) -> Vec<Course> {
    let mut courses: Vec<Course> = Vec::new();
    // title -> position in `courses`
    let mut index_by_title: HashMap<String, usize> = HashMap::new();

    for event in feed.events() {
        let title = course_title(&event.summary);
        let index = match index_by_title.get(&title).copied() {
            Some(index) => index,
            None => {
                index_by_title.insert(title.clone(), courses.len());
                courses.push(Course {
                    hide: hidden.contains(&title),
                    summary: title,
                    recurrences: BTreeMap::new(),
                });
                courses.len() - 1
            }
        };

        if let Some(ref id) = event.recurrence_id {
            courses[index]
                .recurrences
                .entry(id.clone())
                .or_insert_with(|| CourseRecurrence {
                    recurring_id: id.clone(),
                    dt_start: event.start_time().map(|t| t.to_rfc3339()),
                    dt_end: event.end_time().map(|t| t.to_rfc3339()),
                });
        }
    }

    courses
}
