use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single step while driving the editor.
#[derive(Error, Debug)]
pub enum AutomationError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Operation timed out: {0}")]
    Timeout(String),

    #[error("Platform-specific error: {0}")]
    PlatformError(String),

    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),
}

#[derive(Error, Debug)]
pub enum ScribeError {
    #[error("Failed to reach record source: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Record source {url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("Malformed record payload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to prepare output directory {}: {source}", .path.display())]
    OutputDir { path: PathBuf, source: io::Error },
}

impl ScribeError {
    /// True for errors raised while retrieving records, which end a run early
    /// without being treated as a crash.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            ScribeError::Http(_) | ScribeError::Status { .. } | ScribeError::Parse(_)
        )
    }
}
