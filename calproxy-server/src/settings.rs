//! Server configuration.
//!
//! Sources, later ones winning: built-in defaults, an optional
//! `calproxy.toml` (or the file given with `--config`), then environment
//! variables such as `CALPROXY__SERVER__PORT=8080`.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

pub const DEFAULT_UPSTREAM_URL: &str = "https://campus.tum.de/tumonlinej/ws/termin/ical";
const DEFAULT_PORT: i64 = 4321;
const DEFAULT_TIMEOUT_SECS: i64 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub upstream: UpstreamSettings,
    pub logging: LoggingSettings,
    #[serde(default)]
    pub data: DataSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamSettings {
    /// Feed endpoint; identity and token are appended as query parameters
    pub url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
}

/// Optional JSON files replacing the embedded lookup tables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataSettings {
    pub courses: Option<PathBuf>,
    pub buildings: Option<PathBuf>,
}

impl Settings {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("calproxy").required(false),
        };

        let settings = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", DEFAULT_PORT)?
            .set_default("upstream.url", DEFAULT_UPSTREAM_URL)?
            .set_default("upstream.timeout_secs", DEFAULT_TIMEOUT_SECS)?
            .set_default("logging.level", "info")?
            .add_source(file)
            .add_source(
                Environment::with_prefix("CALPROXY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
