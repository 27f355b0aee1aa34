//! One complete test run: plan, dispatch, log and summarize.
mod runner;


pub use runner::{RunOutcome, run_config_file, run_test};
