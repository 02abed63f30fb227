//! Course listing for the hide/filter picker

use std::collections::BTreeMap;

use axum::{
    Json, Router,
    extract::{RawQuery, State},
    routing::get,
};
use calproxy_core::{Course, courses};

use crate::query::RequestParams;
use crate::routes::{AppError, RequestError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/courses", get(list_courses))
}

/// GET /api/courses - Distinct courses of the caller's feed, keyed by title
async fn list_courses(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<BTreeMap<String, Course>>, AppError> {
    let params = RequestParams::parse(query.as_deref());
    let request = params.feed_request().ok_or(RequestError::MissingParameters)?;

    let raw = state.upstream.fetch(&request).await?;
    let listed = courses::list_courses(&raw, &params.hidden_set())?;
    tracing::info!(courses = listed.len(), "Listing courses");

    Ok(Json(
        listed
            .into_iter()
            .map(|course| (course.summary.clone(), course))
            .collect(),
    ))
}
