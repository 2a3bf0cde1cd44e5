//! Loading publish log records from the log directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::SystemError;
use crate::core::schema::{CollectionRecord, RECORD_EXTENSION};
use crate::core::ShellConfig;

/// Reads the set of publish log records from one directory.
#[derive(Debug, Clone)]
pub struct CollectionStore {
    publish_log_dir: PathBuf,
    retention_cap: usize,
}

impl CollectionStore {
    /// `retention_cap` of 0 keeps every record.
    pub fn new(publish_log_dir: impl AsRef<Path>, retention_cap: usize) -> Self {
        CollectionStore {
            publish_log_dir: publish_log_dir.as_ref().to_path_buf(),
            retention_cap,
        }
    }

    pub fn from_config(config: &ShellConfig) -> Self {
        Self::new(&config.publish_log_dir, config.retention_cap)
    }

    pub fn publish_log_dir(&self) -> &Path {
        &self.publish_log_dir
    }

    /// Load the records, most recently modified first.
    ///
    /// Only regular files with a `.json` extension are records. Entries are
    /// enumerated in file name order, stable-sorted by modification time
    /// descending, then truncated to the retention cap.
    ///
    /// # Errors
    /// Returns [`SystemError::Io`] if the directory or an entry's metadata
    /// cannot be read.
    pub fn load_all(&self) -> Result<Vec<CollectionRecord>, SystemError> {
        let dir = &self.publish_log_dir;
        let entries = fs::read_dir(dir).map_err(|e| SystemError::io(dir, e))?;

        let mut records = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| SystemError::io(dir, e))?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }

            let metadata = entry.metadata().map_err(|e| SystemError::io(&path, e))?;
            if !metadata.is_file() {
                continue;
            }
            let last_modified = metadata.modified().map_err(|e| SystemError::io(&path, e))?;

            records.push(CollectionRecord::new(
                entry.file_name().to_string_lossy().into_owned(),
                last_modified,
            ));
        }

        records.sort_by(|a, b| a.name.cmp(&b.name));
        records.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));

        let found = records.len();
        if self.retention_cap > 0 {
            records.truncate(self.retention_cap);
        }

        debug!(
            dir = %dir.display(),
            found,
            kept = records.len(),
            "loaded publish log records"
        );
        Ok(records)
    }
}
