use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use collector_core::config::{
    DEFAULT_API_SOURCE, DEFAULT_BASE_URL, DEFAULT_DATA_FILE, DEFAULT_MAX_BODY_BYTES,
    DEFAULT_SUMMARY_FILE,
};
use collector_core::{CollectorConfig, OutputPaths};

#[derive(Parser, Debug)]
#[command(name = "data-collector")]
#[command(author, version, about = "Collect posts, users, comments and todos into local files")]
#[command(long_about = r#"
Fetches /posts, /users, /comments and /todos from a JSONPlaceholder-style API
with four sequential GET requests, then writes:

  <output>   the full dataset with count metadata, pretty-printed JSON
  <summary>  a plain-text report with the counts and the dataset's size

Any failed request aborts the run before anything is written.

Example:
  data-collector
  data-collector --base-url http://127.0.0.1:3000 --output out/data.json
"#)]
pub struct Cli {
    /// Base URL the four resource paths are resolved against
    #[arg(long, env = "COLLECTOR_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Where to write the full dataset
    #[arg(short, long, env = "COLLECTOR_OUTPUT", default_value = DEFAULT_DATA_FILE)]
    pub output: PathBuf,

    /// Where to write the summary report
    #[arg(short, long, env = "COLLECTOR_SUMMARY", default_value = DEFAULT_SUMMARY_FILE)]
    pub summary: PathBuf,

    /// Label recorded as `api_source` in the metadata
    #[arg(long, default_value = DEFAULT_API_SOURCE)]
    pub api_source: String,

    /// Per-request timeout in seconds (waits indefinitely when unset)
    #[arg(long, value_name = "SECONDS")]
    pub timeout_secs: Option<u64>,

    /// Largest response body accepted per request
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: u64,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn to_config(&self) -> CollectorConfig {
        CollectorConfig {
            base_url: self.base_url.clone(),
            output: OutputPaths {
                data_file: self.output.clone(),
                summary_file: self.summary.clone(),
            },
            api_source: self.api_source.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs),
            max_body_bytes: self.max_body_bytes,
        }
    }
}
