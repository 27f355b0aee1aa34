//! Summary statistics appended to the output file after a run.
mod stats;
mod summary;


pub use stats::SummaryStats;
pub use summary::{SUMMARY_HEADER, summary_lines, write_summary};
