//! Error types shared across the crate.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Category of a recoverable user input error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputErrorKind {
    /// An index or range bound was not a valid integer
    InvalidIndex,
    /// An index fell outside the loaded records
    IndexOutOfRange,
    /// A range's bounds were inconsistent or out of bounds
    InvalidRange,
}

/// A user input error. The session stays usable after one of these.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct InputError {
    pub kind: InputErrorKind,
    pub message: String,
}

impl InputError {
    pub fn new(kind: InputErrorKind, message: impl Into<String>) -> Self {
        InputError {
            kind,
            message: message.into(),
        }
    }
}

/// Category of a [`SystemError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemErrorKind {
    Io,
    Parse,
}

/// Filesystem or record format failure.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read publish log {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid publish log {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid {field} {value:?} in {}: {source}", path.display())]
    Timestamp {
        path: PathBuf,
        field: &'static str,
        value: String,
        #[source]
        source: time::error::Parse,
    },
}

impl SystemError {
    pub(crate) fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        SystemError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn kind(&self) -> SystemErrorKind {
        match self {
            SystemError::Io { .. } => SystemErrorKind::Io,
            SystemError::Unreadable { .. }
            | SystemError::Json { .. }
            | SystemError::Timestamp { .. } => SystemErrorKind::Parse,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            SystemError::Io { path, .. }
            | SystemError::Unreadable { path, .. }
            | SystemError::Json { path, .. }
            | SystemError::Timestamp { path, .. } => path,
        }
    }
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    System(#[from] SystemError),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] std::io::Error),
}

pub type PublishResult<T> = Result<T, PublishError>;
