//! Writing the aggregate record and its summary to disk.
//!
//! The data file is written first and its on-disk size is read back for the
//! summary. A failed summary write leaves the data file in place.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use crate::config::{rule, OutputPaths};
use crate::error::PersistError;
use crate::types::{AggregateRecord, Metadata};

/// What `write_outputs` produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistReport {
    pub data_file: PathBuf,
    pub summary_file: PathBuf,
    pub data_bytes: u64,
}

/// Persist `record`, reporting the outcome to the operator.
///
/// Returns `false` without touching the filesystem when there is no record.
pub fn persist(record: Option<&AggregateRecord>, paths: &OutputPaths) -> bool {
    let Some(record) = record else {
        error!("No data to store");
        return false;
    };
    match write_outputs(record, paths) {
        Ok(report) => {
            debug!(?report, "outputs written");
            true
        }
        Err(err) => {
            error!("Error storing data: {err}");
            false
        }
    }
}

/// Write the pretty-printed record to `paths.data_file`, then the summary to
/// `paths.summary_file`. Existing files are truncated.
pub fn write_outputs(
    record: &AggregateRecord,
    paths: &OutputPaths,
) -> Result<PersistReport, PersistError> {
    let json = serde_json::to_string_pretty(record)?;
    fs::write(&paths.data_file, json).map_err(|source| PersistError::Write {
        path: paths.data_file.clone(),
        source,
    })?;
    info!("Data successfully stored in {}", paths.data_file.display());

    let data_bytes = fs::metadata(&paths.data_file)
        .map_err(|source| PersistError::Stat {
            path: paths.data_file.clone(),
            source,
        })?
        .len();

    let summary = render_summary(record.metadata(), &paths.data_file, data_bytes);
    fs::write(&paths.summary_file, summary).map_err(|source| PersistError::Write {
        path: paths.summary_file.clone(),
        source,
    })?;
    info!("Summary created in {}", paths.summary_file.display());

    Ok(PersistReport {
        data_file: paths.data_file.clone(),
        summary_file: paths.summary_file.clone(),
        data_bytes,
    })
}

pub fn render_summary(metadata: &Metadata, data_file: &Path, data_bytes: u64) -> String {
    format!(
        "DATA COLLECTION SUMMARY\n\
         {rule}\n\
         \n\
         Timestamp: {timestamp}\n\
         API Source: {source}\n\
         Total Posts: {posts}\n\
         Total Users: {users}\n\
         Total Comments: {comments}\n\
         Total Todos: {todos}\n\
         \n\
         Data stored in: {file}\n\
         File size: {data_bytes} bytes\n",
        rule = rule(),
        timestamp = metadata.timestamp,
        source = metadata.api_source,
        posts = metadata.total_posts,
        users = metadata.total_users,
        comments = metadata.total_comments,
        todos = metadata.total_todos,
        file = data_file.display(),
    )
}
