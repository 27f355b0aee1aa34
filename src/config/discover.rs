use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{AppError, AppResult, ConfigError};

const CONFIG_EXTENSIONS: [&str; 4] = ["yaml", "yml", "toml", "json"];

#[must_use]
pub fn is_config_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            CONFIG_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Recursively finds config files below `root`, sorted by path.
///
/// Unreadable subdirectories are skipped with a warning.
///
/// # Errors
///
/// Returns an error when `root` itself cannot be read.
pub fn discover_config_files(root: &Path) -> AppResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(root).map_err(|err| {
        AppError::config(ConfigError::WalkDirectory {
            path: root.to_path_buf(),
            source: err,
        })
    })?;

    let mut found = Vec::new();
    let mut pending: Vec<PathBuf> = Vec::new();
    collect_entries(entries, &mut found, &mut pending);

    while let Some(dir) = pending.pop() {
        match std::fs::read_dir(&dir) {
            Ok(entries) => collect_entries(entries, &mut found, &mut pending),
            Err(err) => warn!("Error accessing directory {}: {}", dir.display(), err),
        }
    }

    found.sort();
    Ok(found)
}

fn collect_entries(entries: std::fs::ReadDir, found: &mut Vec<PathBuf>, pending: &mut Vec<PathBuf>) {
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Error reading directory entry: {}", err);
                continue;
            }
        };
        let path = entry.path();
        match entry.file_type() {
            Ok(kind) if kind.is_dir() => pending.push(path),
            Ok(_) => {
                if is_config_file(&path) {
                    found.push(path);
                }
            }
            Err(err) => warn!("Error accessing file {}: {}", path.display(), err),
        }
    }
}
