//! Embedded landing page and its script

use axum::{
    Router,
    extract::Path,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};

use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../../static/index.html");
const MAIN_JS: &str = include_str!("../../static/main.js");

pub fn router() -> Router<AppState> {
    Router::new().route("/files/{name}", get(static_file))
}

pub fn landing_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /files/{name}
async fn static_file(Path(name): Path<String>) -> Response {
    let (content_type, body) = match name.as_str() {
        "index.html" => ("text/html; charset=utf-8", INDEX_HTML),
        "main.js" => ("text/javascript; charset=utf-8", MAIN_JS),
        _ => return StatusCode::NOT_FOUND.into_response(),
    };
    ([(header::CONTENT_TYPE, content_type)], body).into_response()
}
