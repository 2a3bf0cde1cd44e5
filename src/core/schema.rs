//! Publish log record types.
//!
//! A publish log directory holds one `<name>.json` file per completed publishing
//! run, optionally next to a `<name>/` directory containing the run's artifacts.

use std::path::Path;
use std::time::SystemTime;

use serde::Deserialize;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::SystemError;

/// File extension of publish log records.
pub const RECORD_EXTENSION: &str = "json";

/// Number of most recent records kept after a load unless configured otherwise.
pub const DEFAULT_RETENTION_CAP: usize = 15;

/// One publish log JSON file in the log directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionRecord {
    /// File name including the `.json` extension
    pub name: String,
    pub last_modified: SystemTime,
}

impl CollectionRecord {
    pub fn new(name: impl Into<String>, last_modified: SystemTime) -> Self {
        CollectionRecord {
            name: name.into(),
            last_modified,
        }
    }

    /// Name of the sibling artifact directory: the file name without its extension.
    pub fn artifact_dir_name(&self) -> &str {
        Path::new(&self.name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(&self.name)
    }

    /// Modification time formatted like `Mon Jan  2 15:04:05 2006` (UTC).
    pub fn last_modified_display(&self) -> String {
        let format = format_description!(
            "[weekday repr:short] [month repr:short] [day padding:space] [hour]:[minute]:[second] [year]"
        );
        OffsetDateTime::from(self.last_modified)
            .format(format)
            .unwrap_or_default()
    }
}

/// Fields consumed from a publish log body. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPublishLog {
    publish_start_date: String,
    publish_end_date: String,
}

/// Start and end of a publishing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishWindow {
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
}

impl PublishWindow {
    /// Parse the window out of a publish log JSON body.
    ///
    /// `path` is only used to describe failures.
    pub fn from_json(path: &Path, body: &[u8]) -> Result<Self, SystemError> {
        let raw: RawPublishLog =
            serde_json::from_slice(body).map_err(|source| SystemError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        let parse = |field: &'static str, value: String| {
            parse_timestamp(&value).map_err(|source| SystemError::Timestamp {
                path: path.to_path_buf(),
                field,
                value,
                source,
            })
        };

        Ok(PublishWindow {
            start: parse("publishStartDate", raw.publish_start_date)?,
            end: parse("publishEndDate", raw.publish_end_date)?,
        })
    }

    /// Signed elapsed seconds from start to end. Negative when the end precedes the start.
    pub fn duration_seconds(&self) -> f64 {
        (self.end - self.start).as_seconds_f64()
    }
}

/// Parse a `YYYY-MM-DDTHH:MM:SS.sssZ` timestamp as UTC.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, time::error::Parse> {
    let format =
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");
    PrimitiveDateTime::parse(value, format).map(PrimitiveDateTime::assume_utc)
}

/// Derived metrics for one record.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Position of the record in the loaded list
    pub index: usize,
    pub name: String,
    pub duration_seconds: f64,
    /// Regular files under the artifact directory, recursively
    pub file_count: u64,
    pub size_bytes: u64,
    /// `size_bytes` with a binary prefix, e.g. "12M"
    pub size_human: String,
}
