use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult, ConfigError};

use super::apply::{ResolvedConfig, resolve_config};
use super::types::{ConfigFile, ScalarValue};

/// Loads and resolves the config file at `path`.
///
/// Relative paths inside the file are resolved against the directory that
/// holds it, so `path` is made absolute first.
///
/// # Errors
///
/// Returns an error when the config file cannot be read, parsed or resolved.
pub fn load_config(path: &Path) -> AppResult<ResolvedConfig> {
    let path = absolute_path(path)?;
    let config = load_config_file(&path)?;
    resolve_config(config, &path)
}

/// Parses a config file according to its extension.
///
/// # Errors
///
/// Returns an error when the file cannot be read, has an unsupported
/// extension, or does not deserialize.
pub fn load_config_file(path: &Path) -> AppResult<ConfigFile> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::config(ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("yaml" | "yml") => serde_yaml::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseYaml {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        Some("toml") => toml::from_str::<ConfigFile<ScalarValue>>(&content)
            .map(ConfigFile::<ScalarValue>::into_text)
            .map_err(|err| {
                AppError::config(ConfigError::ParseToml {
                    path: path.to_path_buf(),
                    source: err,
                })
            }),
        Some("json") => serde_json::from_str::<ConfigFile<ScalarValue>>(&content)
            .map(ConfigFile::<ScalarValue>::into_text)
            .map_err(|err| {
                AppError::config(ConfigError::ParseJson {
                    path: path.to_path_buf(),
                    source: err,
                })
            }),
        Some(ext) => Err(AppError::config(ConfigError::UnsupportedExtension {
            ext: ext.to_owned(),
        })),
        None => Err(AppError::config(ConfigError::MissingExtension)),
    }
}

fn absolute_path(path: &Path) -> AppResult<PathBuf> {
    std::path::absolute(path).map_err(|err| {
        AppError::config(ConfigError::AccessPath {
            path: path.to_path_buf(),
            source: err,
        })
    })
}

pub(super) fn resolve_relative(base_dir: &Path, value: &str) -> PathBuf {
    let candidate = PathBuf::from(value);
    if candidate.is_absolute() {
        candidate
    } else {
        base_dir.join(candidate)
    }
}
