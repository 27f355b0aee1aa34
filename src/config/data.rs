use crate::error::{AppError, AppResult, ConfigError};

use super::types::DataSource;

/// Collects substitution rows: inline values as given, then the data file's
/// non-blank lines, trimmed.
///
/// # Errors
///
/// Returns an error when the data file cannot be read.
pub fn load_data_rows(source: &DataSource) -> AppResult<Vec<String>> {
    let mut rows = source.inline.clone();

    if let Some(path) = source.file.as_ref() {
        let content = std::fs::read_to_string(path).map_err(|err| {
            AppError::config(ConfigError::ReadDataFile {
                path: path.clone(),
                source: err,
            })
        })?;
        rows.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_owned),
        );
    }

    Ok(rows)
}
