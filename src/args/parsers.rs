use crate::error::{AppError, AppResult, ValidationError};

pub(crate) fn parse_bool_env(s: &str) -> AppResult<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "no" | "n" | "off" | "" => Ok(false),
        _ => Err(AppError::validation(ValidationError::InvalidBoolean {
            value: s.to_owned(),
        })),
    }
}

/// Parses an HTTP method token case-insensitively (`post`, `GET`, `Purge`).
pub(crate) fn parse_method(s: &str) -> Result<reqwest::Method, ValidationError> {
    let normalized = s.trim().to_ascii_uppercase();
    if normalized.is_empty() {
        return Err(ValidationError::InvalidMethod {
            value: s.to_owned(),
        });
    }
    reqwest::Method::from_bytes(normalized.as_bytes()).map_err(|_| {
        ValidationError::InvalidMethod {
            value: s.to_owned(),
        }
    })
}

pub(crate) fn parse_header_pair(
    name: &str,
    value: &str,
) -> Result<(reqwest::header::HeaderName, reqwest::header::HeaderValue), ValidationError> {
    let header_name = reqwest::header::HeaderName::from_bytes(name.trim().as_bytes()).map_err(
        |_| ValidationError::InvalidHeaderName {
            name: name.to_owned(),
        },
    )?;
    let header_value = reqwest::header::HeaderValue::from_str(value).map_err(|_| {
        ValidationError::InvalidHeaderValue {
            name: name.to_owned(),
        }
    })?;
    Ok((header_name, header_value))
}
