//! End-to-end requests against the router with a local stand-in for the
//! campus feed endpoint.

use std::net::SocketAddr;

use axum::{
    Router,
    body::{Body, to_bytes},
    extract::RawQuery,
    http::{Request, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tokio::net::TcpListener;
use tower::ServiceExt;

use calproxy_core::Tables;
use calproxy_server::{AppState, UpstreamClient, settings::UpstreamSettings};

const DUPLICATION: &str = include_str!("../../calproxy-core/testdata/duplication.ics");
const TOKEN: &str = "SECRET0123456789";

async fn upstream_feed(RawQuery(query): RawQuery) -> Response {
    let query = query.unwrap_or_default();
    if query.contains("pStud=BROKEN") {
        return "<html>maintenance</html>".into_response();
    }
    if !query.contains(&format!("pToken={TOKEN}")) {
        return StatusCode::FORBIDDEN.into_response();
    }
    ([(header::CONTENT_TYPE, "text/calendar")], DUPLICATION).into_response()
}

async fn start_upstream() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = Router::new().route("/ical", get(upstream_feed));
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn app() -> Router {
    let addr = start_upstream().await;
    let upstream = UpstreamClient::new(&UpstreamSettings {
        url: format!("http://{addr}/ical"),
        timeout_secs: 5,
    })
    .unwrap();
    calproxy_server::app(AppState::new(Tables::embedded().unwrap(), upstream))
}

async fn get_uri(app: Router, uri: &str) -> (StatusCode, header::HeaderMap, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_feed_is_cleaned_and_deduplicated() {
    let (status, headers, body) = get_uri(app().await, &format!("/?pStud=ABCDEF&pToken={TOKEN}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/calendar; charset=utf-8");
    assert_eq!(headers[header::CONTENT_LENGTH], body.len().to_string());

    assert!(body.starts_with("BEGIN:VCALENDAR"));
    assert_eq!(body.matches("BEGIN:VEVENT").count(), 2);
    assert!(body.contains("SUMMARY:ERA\r\n"));
    assert!(body.contains("LOCATION:Boltzmannstr. 15"));
}

#[tokio::test]
async fn test_hidden_course_and_offset() {
    let uri = format!(
        "/?pStud=ABCDEF&pToken={TOKEN}&hide=Practical%20Course%3A%20Open%20Source%20Lab%20(IN0012%2C%20IN2106%2C%20IN4308)%20PR%2C%20Standardgruppe&startOffset=583745%2B15"
    );
    let (status, _, body) = get_uri(app().await, &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.matches("BEGIN:VEVENT").count(), 1);
    assert!(!body.contains("Open Source Lab"));
    assert!(body.contains("DTSTART:20240109T171500Z"));
}

#[tokio::test]
async fn test_malformed_offset_is_bad_request() {
    let uri = format!("/?pStud=ABCDEF&pToken={TOKEN}&startOffset=soon");
    let (status, _, body) = get_uri(app().await, &uri).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Invalid offset"));
}

#[tokio::test]
async fn test_rejected_token_is_bad_gateway() {
    let (status, _, body) = get_uri(app().await, "/?pStud=ABCDEF&pToken=WRONG").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("403"));
    assert!(!body.contains("WRONG"));
}

#[tokio::test]
async fn test_non_calendar_upstream_body_is_server_error() {
    let uri = format!("/?pStud=BROKEN&pToken={TOKEN}");
    let (status, _, _) = get_uri(app().await, &uri).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_missing_credentials_serve_landing_page() {
    let (status, headers, body) = get_uri(app().await, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/html"));
    assert!(body.contains("/files/main.js"));
}

#[tokio::test]
async fn test_course_listing() {
    let uri = format!("/api/courses?pPers=P1&pToken={TOKEN}");
    let (status, _, body) = get_uri(app().await, &uri).await;
    assert_eq!(status, StatusCode::OK);

    let courses: serde_json::Value = serde_json::from_str(&body).unwrap();
    let era = &courses["Einführung in die Rechnerarchitektur (IN0004) VO, Standardgruppe"];
    assert_eq!(era["hide"], false);
    assert_eq!(era["recurrences"]["583745"]["recurringId"], "583745");
    assert_eq!(courses.as_object().unwrap().len(), 2);
}

#[tokio::test]
async fn test_course_listing_requires_credentials() {
    let (status, _, body) = get_uri(app().await, "/api/courses?pStud=ABCDEF").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Missing parameters"));
}

#[tokio::test]
async fn test_health_and_static_files() {
    let app = app().await;

    let (status, _, body) = get_uri(app.clone(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"status":"ok"}"#);

    let (status, headers, _) = get_uri(app.clone(), "/files/main.js").await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/javascript"));

    let (status, _, _) = get_uri(app, "/files/secret.txt").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
