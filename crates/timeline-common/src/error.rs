/// Error types for loading a timeline document.
///
/// These cover the infrastructure side of a render (transport, file access, JSON decoding).
/// Application crates wrap `CommonError` via `#[from]` and add their own variants.

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("fetch failed: {location} returned status {status}")]
    Fetch { location: String, status: u16 },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("invalid JSON document: {0}")]
    Parse(#[from] serde_json::Error),
}
