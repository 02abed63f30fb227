//! Error types for the calendar proxy.

use thiserror::Error;

/// Errors that can occur while loading tables or processing a feed.
#[derive(Error, Debug)]
pub enum CalProxyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upstream fetch failed: {0}")]
    UpstreamFetch(String),

    #[error("Upstream responded with HTTP {0}")]
    UpstreamStatus(u16),

    #[error("Upstream request timed out after {0}s")]
    FetchTimeout(u64),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("Invalid offset '{0}': expected <recurrenceId><+|-><minutes>")]
    InvalidOffset(String),
}

/// Result type alias for calendar proxy operations.
pub type CalProxyResult<T> = Result<T, CalProxyError>;
