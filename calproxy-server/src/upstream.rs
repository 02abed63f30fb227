//! Fetching the raw feed from the campus system.

use std::time::Duration;

use calproxy_core::{CalProxyError, CalProxyResult};
use url::Url;

use crate::settings::UpstreamSettings;

/// Whose timetable is requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedOwner {
    Student(String),
    Person(String),
}

impl FeedOwner {
    fn query_key(&self) -> &'static str {
        match self {
            FeedOwner::Student(_) => "pStud",
            FeedOwner::Person(_) => "pPers",
        }
    }

    fn id(&self) -> &str {
        match self {
            FeedOwner::Student(id) | FeedOwner::Person(id) => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRequest {
    pub owner: FeedOwner,
    pub token: String,
}

pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: Url,
    timeout_secs: u64,
}

impl UpstreamClient {
    pub fn new(settings: &UpstreamSettings) -> CalProxyResult<Self> {
        let base_url = Url::parse(&settings.url)
            .map_err(|e| CalProxyError::Config(format!("Invalid upstream url '{}': {}", settings.url, e)))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(concat!("calproxy/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CalProxyError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(UpstreamClient {
            http,
            base_url,
            timeout_secs: settings.timeout_secs,
        })
    }

    pub fn feed_url(&self, request: &FeedRequest) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair(request.owner.query_key(), request.owner.id())
            .append_pair("pToken", &request.token);
        url
    }

    /// Raw feed bytes. Errors never carry the request URL, since it holds the token.
    pub async fn fetch(&self, request: &FeedRequest) -> CalProxyResult<Vec<u8>> {
        let response = self
            .http
            .get(self.feed_url(request))
            .send()
            .await
            .map_err(|e| self.fetch_error(e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Upstream rejected feed request");
            return Err(CalProxyError::UpstreamStatus(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| self.fetch_error(e))?;
        tracing::debug!(bytes = body.len(), "Fetched upstream feed");

        Ok(body.to_vec())
    }

    fn fetch_error(&self, err: reqwest::Error) -> CalProxyError {
        if err.is_timeout() {
            CalProxyError::FetchTimeout(self.timeout_secs)
        } else {
            CalProxyError::UpstreamFetch(err.without_url().to_string())
        }
    }
}
