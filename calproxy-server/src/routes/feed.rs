//! The calendar feed endpoint

use axum::{
    Router,
    extract::{RawQuery, State},
    http::header,
    response::{IntoResponse, Response},
    routing::any,
};
use calproxy_core::FeedAssembler;

use crate::query::RequestParams;
use crate::routes::{AppError, assets};
use crate::state::AppState;

const ICS_CONTENT_TYPE: &str = "text/calendar; charset=utf-8";

pub fn router() -> Router<AppState> {
    Router::new().route("/", any(serve_feed))
}

/// GET|POST / - Cleaned feed, or the landing page when credentials are missing
async fn serve_feed(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Response, AppError> {
    let params = RequestParams::parse(query.as_deref());
    let Some(request) = params.feed_request() else {
        return Ok(assets::landing_page().into_response());
    };

    // Reject bad offsets before contacting upstream
    let options = params.feed_options()?;

    let raw = state.upstream.fetch(&request).await?;
    let feed = FeedAssembler::new(&state.tables).assemble(&raw, &options)?;
    let body = feed.to_ics();

    tracing::info!(
        events = feed.event_count(),
        hidden = options.hidden.len(),
        "Serving feed"
    );

    Ok((
        [
            (header::CONTENT_TYPE, ICS_CONTENT_TYPE.to_string()),
            (header::CONTENT_LENGTH, body.len().to_string()),
        ],
        body,
    )
        .into_response())
}
