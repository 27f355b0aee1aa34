//! Core library for the `volley` CLI.
//!
//! A run reads one config file, expands its URL template and data rows into
//! an ordered request plan, executes the plan with a bounded number of
//! requests in flight and appends a summary of status codes and response
//! times to the output file. The `volley` binary drives this through
//! [`entry::run`]; the modules below are public so runs can be embedded and
//! tested without the CLI.
pub mod app;
pub mod args;
pub mod config;
pub mod dispatch;
pub mod entry;
pub mod error;
pub mod http;
pub mod metrics;
pub mod plan;
pub mod report;
mod system;
