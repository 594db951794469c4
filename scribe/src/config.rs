//! Run parameters
//!
//! Every tunable the run needs lives in [`ScribeConfig`]. The defaults are the
//! fixed values the tool ships with; nothing is read from flags or files.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com/posts";
pub const DEFAULT_RECORD_COUNT: usize = 10;
pub const DEFAULT_EDITOR_PATH: &str = r"C:\Windows\System32\notepad.exe";
pub const OUTPUT_DIR_NAME: &str = "tjm-project";

#[derive(Debug, Clone)]
pub struct ScribeConfig {
    /// Endpoint returning a JSON array of posts
    pub api_url: String,
    /// Maximum number of records to process
    pub record_count: usize,
    /// Delay between injected keystrokes
    pub key_pause: Duration,
    /// How long to wait for the "Save As" dialog
    pub save_timeout: Duration,
    /// How long to wait for the editor window after launch
    pub window_timeout: Duration,
    /// How long to watch for the overwrite confirmation
    pub confirm_timeout: Duration,
    /// Sleep between attempts of every busy-poll loop
    pub poll_interval: Duration,
    /// Pause after spawning the editor before looking for its window
    pub launch_settle: Duration,
    /// Pause between two records
    pub record_pause: Duration,
    pub request_timeout: Duration,
    pub editor_path: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for ScribeConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            record_count: DEFAULT_RECORD_COUNT,
            key_pause: Duration::from_millis(8),
            save_timeout: Duration::from_secs(8),
            window_timeout: Duration::from_secs(6),
            confirm_timeout: Duration::from_secs(3),
            poll_interval: Duration::from_millis(200),
            launch_settle: Duration::from_millis(400),
            record_pause: Duration::from_millis(500),
            request_timeout: Duration::from_secs(10),
            editor_path: PathBuf::from(DEFAULT_EDITOR_PATH),
            output_dir: default_output_dir(),
        }
    }
}

impl ScribeConfig {
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

/// `~/Desktop/tjm-project`, relative to the working directory when no home
/// directory can be resolved.
pub fn default_output_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Desktop")
        .join(OUTPUT_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_constants() {
        let config = ScribeConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.record_count, 10);
        assert_eq!(config.key_pause, Duration::from_millis(8));
        assert_eq!(config.save_timeout, Duration::from_secs(8));
        assert!(config.output_dir.ends_with("Desktop/tjm-project"));
    }

    #[test]
    fn builders_override_fields() {
        let config = ScribeConfig::default()
            .with_output_dir("/tmp/out")
            .with_api_url("http://127.0.0.1:1/posts");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.api_url, "http://127.0.0.1:1/posts");
    }
}
