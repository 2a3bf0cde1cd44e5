//! Shell configuration: where the publish log lives and how many records to keep.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::schema::DEFAULT_RETENTION_CAP;
use crate::{PublishError, PublishResult};

/// Directory below `zebedee_root` that holds the publish log.
pub const ZEBEDEE_PUBLISH_LOG: &str = "zebedee/publish-log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub publish_log_dir: PathBuf,
    /// Maximum records kept after a load; 0 keeps everything
    pub retention_cap: usize,
}

/// Optional TOML configuration file.
///
/// ```toml
/// publish_log_dir = "/var/zebedee/publish-log"
/// retention_cap = 100
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub publish_log_dir: Option<PathBuf>,
    pub retention_cap: Option<usize>,
}

/// Raw configuration inputs, highest precedence first within each field.
#[derive(Debug, Default, Clone)]
pub struct ConfigSources {
    /// `--publish-log-dir` or `PUBLISH_LOG_DIR`
    pub publish_log_dir: Option<PathBuf>,
    /// `--limit` or `PUBLISH_TIMES_LIMIT`
    pub retention_cap: Option<usize>,
    /// `--config`
    pub config_file: Option<PathBuf>,
    /// `zebedee_root`
    pub zebedee_root: Option<PathBuf>,
}

pub fn load_file_config(path: &Path) -> PublishResult<FileConfig> {
    let s = std::fs::read_to_string(path).map_err(|e| {
        PublishError::Config(format!("failed to read {}: {e}", path.display()))
    })?;
    toml::from_str(&s)
        .map_err(|e| PublishError::Config(format!("failed to parse {}: {e}", path.display())))
}

/// Resolve the effective configuration.
///
/// The log directory comes from the explicit value, then the config file, then
/// `$zebedee_root/zebedee/publish-log`. The retention cap comes from the explicit
/// value, then the config file, then [`DEFAULT_RETENTION_CAP`].
pub fn resolve(sources: ConfigSources) -> PublishResult<ShellConfig> {
    let file = match &sources.config_file {
        Some(path) => load_file_config(path)?,
        None => FileConfig::default(),
    };

    let publish_log_dir = sources
        .publish_log_dir
        .filter(|p| !p.as_os_str().is_empty())
        .or(file.publish_log_dir)
        .or_else(|| {
            sources
                .zebedee_root
                .filter(|p| !p.as_os_str().is_empty())
                .map(|root| root.join(ZEBEDEE_PUBLISH_LOG))
        })
        .ok_or_else(|| {
            PublishError::Config(
                "no publish log directory: pass --publish-log-dir or set PUBLISH_LOG_DIR".to_string(),
            )
        })?;

    let retention_cap = sources
        .retention_cap
        .or(file.retention_cap)
        .unwrap_or(DEFAULT_RETENTION_CAP);

    Ok(ShellConfig {
        publish_log_dir,
        retention_cap,
    })
}
