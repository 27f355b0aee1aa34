//! CLI argument types and parsing helpers.
mod cli;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
mod test_support;

pub use cli::TesterArgs;
pub use types::{BodyFormat, CaptureMode, PositiveUsize};
