use std::sync::Arc;

use calproxy_core::Tables;

use crate::upstream::UpstreamClient;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    // Loaded once at startup and read-only afterwards
    pub tables: Arc<Tables>,
    pub upstream: Arc<UpstreamClient>,
}

impl AppState {
    pub fn new(tables: Tables, upstream: UpstreamClient) -> Self {
        AppState {
            tables: Arc::new(tables),
            upstream: Arc::new(upstream),
        }
    }
}
