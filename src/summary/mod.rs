//! Per-record publish summaries.
//!
//! A summary combines the publish window recorded in the JSON body with the
//! file count and size of the record's artifact directory.

pub mod walk;

pub use walk::{DirStats, human_size, walk_artifact_dir};

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::SystemError;
use crate::core::schema::{CollectionRecord, PublishWindow, Summary};

/// Computes [`Summary`] values for records of one publish log directory.
#[derive(Debug, Clone)]
pub struct SummaryComputer {
    publish_log_dir: PathBuf,
}

impl SummaryComputer {
    pub fn new(publish_log_dir: impl AsRef<Path>) -> Self {
        SummaryComputer {
            publish_log_dir: publish_log_dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the record's JSON file.
    pub fn record_path(&self, record: &CollectionRecord) -> PathBuf {
        self.publish_log_dir.join(&record.name)
    }

    /// Path of the record's artifact directory: its JSON path without the extension.
    pub fn artifact_dir(&self, record: &CollectionRecord) -> PathBuf {
        self.publish_log_dir.join(record.artifact_dir_name())
    }

    /// Read the publish window from the record's JSON body.
    pub fn publish_window(&self, record: &CollectionRecord) -> Result<PublishWindow, SystemError> {
        let path = self.record_path(record);
        let body = fs::read(&path).map_err(|source| SystemError::Unreadable {
            path: path.clone(),
            source,
        })?;
        PublishWindow::from_json(&path, &body)
    }

    /// Compute the summary of `record`, reported under `index`.
    ///
    /// Either every metric is computed or an error is returned; there is no
    /// partial summary.
    pub fn summarize(
        &self,
        index: usize,
        record: &CollectionRecord,
    ) -> Result<Summary, SystemError> {
        let window = self.publish_window(record)?;
        let stats = walk_artifact_dir(&self.artifact_dir(record))?;

        debug!(
            index,
            name = %record.name,
            files = stats.file_count,
            bytes = stats.total_bytes,
            "summarized publish"
        );

        Ok(Summary {
            index,
            name: record.name.clone(),
            duration_seconds: window.duration_seconds(),
            file_count: stats.file_count,
            size_bytes: stats.total_bytes,
            size_human: human_size(stats.total_bytes),
        })
    }
}
