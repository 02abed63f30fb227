//! Request parameters shared by the feed and course endpoints.
//!
//! Parsed from the raw query string so that repeated keys (`hide`,
//! `startOffset`, ...) are all kept.

use std::collections::HashSet;

use calproxy_core::{CalProxyResult, FeedOptions, Offsets};
use url::form_urlencoded;

use crate::upstream::{FeedOwner, FeedRequest};

#[derive(Debug, Default, Clone)]
pub struct RequestParams {
    pub student: Option<String>,
    pub person: Option<String>,
    pub token: Option<String>,
    pub hidden: Vec<String>,
    pub start_offsets: Vec<String>,
    pub end_offsets: Vec<String>,
}

impl RequestParams {
    pub fn parse(query: Option<&str>) -> Self {
        let mut params = RequestParams::default();
        let Some(query) = query else {
            return params;
        };

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let value = value.into_owned();
            match key.as_ref() {
                "pStud" => params.student = non_empty(value),
                "pPers" => params.person = non_empty(value),
                "pToken" => params.token = non_empty(value),
                "hide" | "filter" => params.hidden.push(value),
                "startOffset" => params.start_offsets.push(offset_value(value)),
                "endOffset" => params.end_offsets.push(offset_value(value)),
                _ => {}
            }
        }

        params
    }

    /// `None` unless a token and a student or person id are present.
    /// A student id takes precedence over a person id.
    pub fn feed_request(&self) -> Option<FeedRequest> {
        let token = self.token.clone()?;
        let owner = match (&self.student, &self.person) {
            (Some(id), _) => FeedOwner::Student(id.clone()),
            (None, Some(id)) => FeedOwner::Person(id.clone()),
            (None, None) => return None,
        };
        Some(FeedRequest { owner, token })
    }

    pub fn hidden_set(&self) -> HashSet<String> {
        self.hidden.iter().cloned().collect()
    }

    pub fn feed_options(&self) -> CalProxyResult<FeedOptions> {
        Ok(FeedOptions {
            hidden: self.hidden_set(),
            offsets: Offsets::parse(&self.start_offsets, &self.end_offsets)?,
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}

// An unencoded `+` arrives as a space after form decoding.
fn offset_value(value: String) -> String {
    value.replace(' ', "+")
}
