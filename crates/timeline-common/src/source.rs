/// Loader for the timeline JSON document.
///
/// A source is either an `http(s)://` URL fetched with `reqwest` or a local file path.
/// Every call to `load` performs a fresh read; nothing is cached between loads and
/// failed loads are never retried.
use std::path::PathBuf;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::error::CommonError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Http(String),
    File(PathBuf),
}

impl DataSource {
    /// Interpret a configured location. Anything with an http(s) scheme is fetched
    /// over the network, everything else is treated as a filesystem path.
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            DataSource::Http(trimmed.to_string())
        } else {
            DataSource::File(PathBuf::from(trimmed))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            DataSource::Http(url) => url.clone(),
            DataSource::File(path) => path.display().to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct LoaderConfig {
    pub timeout: Duration,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl LoaderConfig {
    /// Optional:
    /// - `TIMELINE_FETCH_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Self {
        let timeout = std::env::var("TIMELINE_FETCH_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|&n| n > 0)
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        Self { timeout }
    }
}

#[derive(Clone)]
pub struct DocumentLoader {
    config: LoaderConfig,
    http: reqwest::Client,
}

impl DocumentLoader {
    pub fn new(config: LoaderConfig) -> Result<Self, CommonError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("career-timeline/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { config, http })
    }

    /// Read the raw document body from `source`.
    ///
    /// Non-success HTTP statuses and unreadable files map to fetch errors.
    pub async fn fetch_text(&self, source: &DataSource) -> Result<String, CommonError> {
        match source {
            DataSource::Http(url) => {
                let resp = self
                    .http
                    .get(url)
                    .timeout(self.config.timeout)
                    .send()
                    .await?;
                let status = resp.status();
                if !status.is_success() {
                    warn!(url = %url, status = status.as_u16(), "data fetch returned error status");
                    return Err(CommonError::Fetch {
                        location: url.clone(),
                        status: status.as_u16(),
                    });
                }
                Ok(resp.text().await?)
            }
            DataSource::File(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
                CommonError::Io {
                    path: path.display().to_string(),
                    message: e.to_string(),
                }
            }),
        }
    }

    /// Fetch and decode a JSON document.
    pub async fn load<T: DeserializeOwned>(&self, source: &DataSource) -> Result<T, CommonError> {
        let body = self.fetch_text(source).await?;
        let document = serde_json::from_str(&body)?;
        info!(source = %source.describe(), bytes = body.len(), "document loaded");
        Ok(document)
    }
}
