//! Core types and configuration for publish-times.

pub mod config;
pub mod schema;

pub use config::{ConfigSources, ShellConfig};
pub use schema::{
    CollectionRecord, DEFAULT_RETENTION_CAP, PublishWindow, RECORD_EXTENSION, Summary,
};
