use std::path::Path;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::HeaderMap;
use tracing::warn;

use crate::args::parsers::{parse_header_pair, parse_method};
use crate::args::{BodyFormat, CaptureMode, PositiveUsize};
use crate::error::{AppError, AppResult, ConfigError};

use super::loader::resolve_relative;
use super::types::{ConfigFile, DataSource, RunConfig};

/// Repeat count used when a config omits `repeats`.
const DEFAULT_REPEATS: usize = 1;
/// Concurrency ceiling used when a config omits `concurrency`.
const DEFAULT_CONCURRENCY: usize = 1;

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub run: RunConfig,
    pub data: DataSource,
}

/// Turns a parsed config file into run settings.
///
/// `config_path` must be absolute; `dataFile` and `outputFile` are resolved
/// relative to its parent directory.
///
/// # Errors
///
/// Returns an error for missing required fields, an invalid method or
/// header, or a zero concurrency.
pub fn resolve_config(config: ConfigFile, config_path: &Path) -> AppResult<ResolvedConfig> {
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new(""));

    let url = config.url.ok_or_else(|| {
        AppError::config(ConfigError::MissingField {
            path: config_path.to_path_buf(),
            field: "url",
        })
    })?;
    let output_file = config.output_file.ok_or_else(|| {
        AppError::config(ConfigError::MissingField {
            path: config_path.to_path_buf(),
            field: "outputFile",
        })
    })?;

    let method = match config.method.as_deref() {
        Some(value) => parse_method(value)?,
        None => Method::GET,
    };

    let mut headers = HeaderMap::new();
    for (name, value) in config.headers.unwrap_or_default() {
        let (header_name, header_value) = parse_header_pair(&name, &value)
            .map_err(|err| AppError::config(ConfigError::InvalidHeader { source: err }))?;
        headers.insert(header_name, header_value);
    }

    let concurrency = PositiveUsize::try_from(config.concurrency.unwrap_or(DEFAULT_CONCURRENCY))
        .map_err(|err| {
            AppError::config(ConfigError::FieldMustBePositive {
                field: "concurrency",
                source: err,
            })
        })?;

    let capture = match config.capture_result.as_deref() {
        Some(label) => CaptureMode::from_label(label).unwrap_or_else(|| {
            warn!(
                "Unknown captureResult '{}' in {}; no per-request lines will be written.",
                label,
                config_path.display()
            );
            CaptureMode::None
        }),
        None => CaptureMode::None,
    };

    let body_format = config
        .post_data_format
        .as_deref()
        .map(BodyFormat::from_label)
        .unwrap_or_default();

    let run = RunConfig {
        url,
        method,
        headers,
        body_template: config.post_body.unwrap_or_default(),
        body_format,
        repeats: config.repeats.unwrap_or(DEFAULT_REPEATS),
        concurrency,
        delay: Duration::from_millis(config.delay.unwrap_or(0)),
        capture,
        output_path: resolve_relative(base_dir, &output_file),
    };

    let data = DataSource {
        inline: config.data.unwrap_or_default(),
        file: config
            .data_file
            .filter(|value| !value.is_empty())
            .map(|value| resolve_relative(base_dir, &value)),
    };

    Ok(ResolvedConfig { run, data })
}
