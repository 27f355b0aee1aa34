//! Outcome aggregation and the per-request text log.
mod aggregator;
mod logging;
mod types;


pub use aggregator::MetricsAggregator;
pub use logging::{FileLogSink, LogSink, format_log_line};
pub use types::{MetricsState, RequestOutcome, TRANSPORT_FAILURE_STATUS};
