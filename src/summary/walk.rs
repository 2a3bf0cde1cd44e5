//! Recursive file count and byte size of an artifact directory.

use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

use crate::SystemError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirStats {
    pub file_count: u64,
    pub total_bytes: u64,
}

/// Count the regular files below `dir` and sum their sizes.
///
/// Directories are not counted and symbolic links are not followed.
///
/// # Errors
/// Returns [`SystemError::Io`] if `dir` is missing, is not a directory, or any
/// part of it cannot be traversed.
pub fn walk_artifact_dir(dir: &Path) -> Result<DirStats, SystemError> {
    let metadata = fs::metadata(dir).map_err(|e| SystemError::io(dir, e))?;
    if !metadata.is_dir() {
        return Err(SystemError::io(
            dir,
            io::Error::other("artifact path is not a directory"),
        ));
    }

    let mut stats = DirStats::default();
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            SystemError::io(path, io::Error::from(e))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let len = entry
            .metadata()
            .map_err(|e| SystemError::io(entry.path(), io::Error::from(e)))?
            .len();
        stats.file_count += 1;
        stats.total_bytes += len;
    }
    Ok(stats)
}

const UNITS: [char; 6] = ['K', 'M', 'G', 'T', 'P', 'E'];

/// Render a byte count with a binary prefix the way `du -h` does.
///
/// Below 1 KiB the plain number is printed. Scaled values under 10 keep one
/// decimal, larger ones are whole numbers; both are rounded up.
pub fn human_size(bytes: u64) -> String {
    if bytes < 1024 {
        return bytes.to_string();
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }

    if value < 10.0 {
        let tenths = (value * 10.0).ceil() / 10.0;
        if tenths < 10.0 {
            return format!("{tenths:.1}{}", UNITS[unit]);
        }
        value = tenths;
    }

    let whole = value.ceil();
    if whole >= 1024.0 && unit + 1 < UNITS.len() {
        return format!("1.0{}", UNITS[unit + 1]);
    }
    format!("{}{}", whole as u64, UNITS[unit])
}
