use clap::Parser;
use std::path::PathBuf;

use super::parsers::parse_bool_env;

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Config-driven HTTP load generator - templated request plans, bounded concurrency, per-status latency summaries."
)]
pub struct TesterArgs {
    /// Config file (.yaml, .yml, .toml, .json) or a directory searched recursively for them
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Enable verbose logging (sets log level to debug unless overridden by VOLLEY_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}
