use std::path::PathBuf;

use timeline_common::source::{DataSource, LoaderConfig};

use crate::error::AppError;

/// Application configuration loaded explicitly from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the career JSON document lives (URL or filesystem path).
    pub data_source: DataSource,
    /// Output file for one-shot rendering. `None` writes to stdout.
    pub output: Option<PathBuf>,
    /// Address to serve the page on. `None` renders once and exits.
    pub listen_addr: Option<String>,
    /// Page heading and `<title>`.
    pub title: String,
    pub loader: LoaderConfig,
}

impl Config {
    /// Required:
    /// - `TIMELINE_DATA_SOURCE`: URL or path of the career JSON document
    ///
    /// Optional:
    /// - `TIMELINE_OUTPUT`: file to write the rendered page to (default: stdout)
    /// - `TIMELINE_LISTEN_ADDR`: serve over HTTP instead of rendering once
    /// - `TIMELINE_TITLE` (default: "Career Timeline")
    /// - `TIMELINE_FETCH_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, AppError> {
        let location = std::env::var("TIMELINE_DATA_SOURCE").map_err(|_| {
            AppError::Config("TIMELINE_DATA_SOURCE environment variable is required".to_string())
        })?;
        if location.trim().is_empty() {
            return Err(AppError::Config(
                "TIMELINE_DATA_SOURCE must not be empty".to_string(),
            ));
        }

        Ok(Self {
            data_source: DataSource::parse(&location),
            output: non_empty_var("TIMELINE_OUTPUT").map(PathBuf::from),
            listen_addr: non_empty_var("TIMELINE_LISTEN_ADDR"),
            title: non_empty_var("TIMELINE_TITLE").unwrap_or_else(|| "Career Timeline".to_string()),
            loader: LoaderConfig::from_env(),
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
