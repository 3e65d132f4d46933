//! Run configuration and its defaults.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
pub const DEFAULT_DATA_FILE: &str = "collected_data.json";
pub const DEFAULT_SUMMARY_FILE: &str = "data_summary.txt";
pub const DEFAULT_API_SOURCE: &str = "JSONPlaceholder";

/// Cap on a single response body. The largest collection is well under 1 MiB.
pub const DEFAULT_MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;

/// Width of the `=` rule used in the summary file and console banners.
pub const RULE_WIDTH: usize = 50;

/// Horizontal rule of `RULE_WIDTH` `=` characters.
pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Where the persister writes its two files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub data_file: PathBuf,
    pub summary_file: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            summary_file: PathBuf::from(DEFAULT_SUMMARY_FILE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorConfig {
    pub base_url: String,
    pub output: OutputPaths,
    pub api_source: String,
    /// Global per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    pub max_body_bytes: u64,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output: OutputPaths::default(),
            api_source: DEFAULT_API_SOURCE.to_string(),
            timeout: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}
