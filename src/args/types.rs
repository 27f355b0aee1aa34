use std::num::NonZeroUsize;

use crate::error::ValidationError;

/// Per-request detail written to the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureMode {
    #[default]
    None,
    Simple,
    Full,
}

impl CaptureMode {
    /// Resolves a config label case-insensitively; unknown labels yield `None`.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "none" => Some(CaptureMode::None),
            "simple" => Some(CaptureMode::Simple),
            "full" => Some(CaptureMode::Full),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CaptureMode::None => "none",
            CaptureMode::Simple => "simple",
            CaptureMode::Full => "full",
        }
    }
}

/// Encoding of the request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyFormat {
    Json,
    Form,
    #[default]
    Raw,
}

impl BodyFormat {
    /// Resolves a config label case-insensitively. Anything unrecognized is sent raw.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "json" => BodyFormat::Json,
            "form" => BodyFormat::Form,
            _ => BodyFormat::Raw,
        }
    }

    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            BodyFormat::Json => "application/json",
            BodyFormat::Form => "application/x-www-form-urlencoded",
            BodyFormat::Raw => "text/plain",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositiveUsize(NonZeroUsize);

impl PositiveUsize {
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<usize> for PositiveUsize {
    type Error = ValidationError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        NonZeroUsize::new(value)
            .map(PositiveUsize)
            .ok_or_else(|| ValidationError::ValueTooSmall { min: 1 })
    }
}

impl std::str::FromStr for PositiveUsize {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: usize = s
            .parse()
            .map_err(|err| ValidationError::InvalidNumber { source: err })?;
        PositiveUsize::try_from(value)
    }
}

impl From<PositiveUsize> for usize {
    fn from(value: PositiveUsize) -> Self {
        value.get()
    }
}
