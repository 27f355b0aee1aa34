use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::HeaderMap;
use serde::Deserialize;

use crate::args::{BodyFormat, CaptureMode, PositiveUsize};

/// On-disk shape of a test definition. Keys match across YAML, TOML and JSON.
///
/// `S` is the type header values and data rows are read as. YAML reads them
/// straight into `String`, which keeps the scalar's source text (`1.10` stays
/// `1.10`). TOML and JSON carry typed numbers and go through [`ScalarValue`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile<S = String> {
    pub url: Option<String>,
    pub method: Option<String>,
    pub headers: Option<BTreeMap<String, S>>,
    pub data: Option<Vec<S>>,
    pub data_file: Option<String>,
    pub output_file: Option<String>,
    pub repeats: Option<usize>,
    pub concurrency: Option<usize>,
    pub delay: Option<u64>,
    pub capture_result: Option<String>,
    pub post_data_format: Option<String>,
    pub post_body: Option<String>,
}

impl ConfigFile<ScalarValue> {
    /// Renders typed scalars as text. Numbers use their canonical form, so
    /// quote a value in TOML or JSON to send it verbatim.
    #[must_use]
    pub fn into_text(self) -> ConfigFile {
        ConfigFile {
            url: self.url,
            method: self.method,
            headers: self.headers.map(|headers| {
                headers
                    .into_iter()
                    .map(|(name, value)| (name, value.into_text()))
                    .collect()
            }),
            data: self
                .data
                .map(|rows| rows.into_iter().map(ScalarValue::into_text).collect()),
            data_file: self.data_file,
            output_file: self.output_file,
            repeats: self.repeats,
            concurrency: self.concurrency,
            delay: self.delay,
            capture_result: self.capture_result,
            post_data_format: self.post_data_format,
            post_body: self.post_body,
        }
    }
}

/// A TOML or JSON scalar that is used as text no matter how it was typed.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl ScalarValue {
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            ScalarValue::Text(text) => text,
            ScalarValue::Integer(value) => value.to_string(),
            ScalarValue::Float(value) => value.to_string(),
            ScalarValue::Bool(value) => value.to_string(),
        }
    }
}

/// Fully resolved settings for one test run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub url: String,
    pub method: Method,
    pub headers: HeaderMap,
    pub body_template: String,
    pub body_format: BodyFormat,
    pub repeats: usize,
    pub concurrency: PositiveUsize,
    pub delay: Duration,
    pub capture: CaptureMode,
    pub output_path: PathBuf,
}

/// Where the substitution rows come from.
#[derive(Debug, Clone, Default)]
pub struct DataSource {
    pub inline: Vec<String>,
    pub file: Option<PathBuf>,
}
