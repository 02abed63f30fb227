pub mod assets;
pub mod courses;
pub mod feed;
pub mod health;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use calproxy_core::CalProxyError;
use serde::Serialize;
use thiserror::Error;

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Request problems detected before anything is fetched.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Missing parameters: pToken and one of pStud or pPers are required")]
    MissingParameters,
}

/// Convert anyhow errors to HTTP responses
pub struct AppError(anyhow::Error);

impl AppError {
    fn status(&self) -> StatusCode {
        if let Some(err) = self.0.downcast_ref::<CalProxyError>() {
            return match err {
                CalProxyError::InvalidOffset(_) => StatusCode::BAD_REQUEST,
                CalProxyError::UpstreamFetch(_) | CalProxyError::UpstreamStatus(_) => {
                    StatusCode::BAD_GATEWAY
                }
                CalProxyError::FetchTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
        }
        if self.0.downcast_ref::<RequestError>().is_some() {
            return StatusCode::BAD_REQUEST;
        }
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self.0, "Request failed");
        } else {
            tracing::info!(status = status.as_u16(), error = %self.0, "Request rejected");
        }

        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: impl Into<anyhow::Error>) -> StatusCode {
        AppError::from(err).into_response().status()
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(status_of(CalProxyError::InvalidOffset("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(CalProxyError::UpstreamStatus(403)), StatusCode::BAD_GATEWAY);
        assert_eq!(status_of(CalProxyError::UpstreamFetch("refused".into())), StatusCode::BAD_GATEWAY);
        assert_eq!(status_of(CalProxyError::FetchTimeout(30)), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            status_of(CalProxyError::IcsParse("bad".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(status_of(RequestError::MissingParameters), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(anyhow::anyhow!("boom")), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
