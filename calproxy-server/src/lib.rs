//! HTTP front end for the calendar proxy.

pub mod logging;
pub mod query;
pub mod redact;
pub mod routes;
pub mod settings;
pub mod state;
pub mod upstream;

use axum::{Router, extract::Request};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::Level;

pub use settings::Settings;
pub use state::AppState;
pub use upstream::UpstreamClient;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Health probes stay out of the request log
    let trace = TraceLayer::new_for_http()
        .make_span_with(|request: &Request| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %redact::redact_uri(request.uri()),
            )
        })
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let traced = Router::new()
        .merge(routes::feed::router())
        .merge(routes::courses::router())
        .merge(routes::assets::router())
        .layer(trace);

    Router::new()
        .merge(traced)
        .merge(routes::health::router())
        .with_state(state)
        .layer(cors)
}
