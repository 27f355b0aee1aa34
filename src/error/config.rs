use std::path::PathBuf;

use super::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse YAML config '{path}': {source}")]
    ParseYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Failed to parse TOML config '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to parse JSON config '{path}': {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Unsupported config extension '{ext}'. Use .yaml, .yml, .toml or .json.")]
    UnsupportedExtension { ext: String },
    #[error("Config file must have a .yaml, .yml, .toml or .json extension.")]
    MissingExtension,
    #[error("Config '{path}' is missing required field '{field}'.")]
    MissingField { path: PathBuf, field: &'static str },
    #[error("Failed to read data file '{path}': {source}")]
    ReadDataFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to access '{path}': {source}")]
    AccessPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to walk directory '{path}': {source}")]
    WalkDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid header: {source}")]
    InvalidHeader {
        #[source]
        source: ValidationError,
    },
    #[error("Config '{field}' must be >= 1: {source}")]
    FieldMustBePositive {
        field: &'static str,
        #[source]
        source: ValidationError,
    },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
