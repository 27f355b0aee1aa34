use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::io::AsyncWrite;

use crate::config::RunConfig;
use crate::error::{AppError, AppResult, OutputError};
use crate::metrics::{LogSink, MetricsState};

use super::stats::SummaryStats;

pub const SUMMARY_HEADER: &str = "--- Test Results Summary ---";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders the summary block, starting with the blank separator line.
#[must_use]
pub fn summary_lines(state: &MetricsState, config: &RunConfig) -> Vec<String> {
    let stats = SummaryStats::from_state(state);
    let mut lines = vec![
        String::new(),
        SUMMARY_HEADER.to_owned(),
        format!("URL Pattern: {}", config.url),
        format!("Method: {}", config.method),
        format!("Repeats: {}", config.repeats),
        format!("Concurrency: {}", config.concurrency.get()),
        format!("Delay: {}ms", config.delay.as_millis()),
        String::new(),
        format!("Test Start: {}", format_timestamp(Some(state.started_at))),
        format!("Test End: {}", format_timestamp(state.finished_at)),
        format!(
            "Test Duration: {:.2} seconds",
            stats.total_duration.as_secs_f64()
        ),
        format!("Total Requests: {}", state.request_count),
        String::new(),
        "Response Status Codes:".to_owned(),
    ];
    lines.extend(
        state
            .status_code_counts
            .iter()
            .map(|(code, count)| format!("- {}: {}", code, count)),
    );

    lines.push(String::new());
    lines.push("Response Time (ms):".to_owned());
    lines.push(format!("- Average: {}", format_millis(stats.average)));
    lines.push(format!("- Shortest: {}", format_millis(stats.shortest)));
    lines.push(format!("- Longest: {}", format_millis(stats.longest)));

    lines.push(String::new());
    lines.push("Average Response Time by Status Code (ms):".to_owned());
    lines.extend(
        stats
            .average_by_code
            .iter()
            .map(|(code, avg)| format!("- {}: {}ms", code, avg.as_millis())),
    );
    lines
}

/// Appends the summary block to the run's log sink and flushes it.
///
/// # Errors
///
/// Returns an error if the block cannot be written or flushed.
pub async fn write_summary<W>(
    sink: &LogSink<W>,
    state: &MetricsState,
    config: &RunConfig,
) -> AppResult<()>
where
    W: AsyncWrite + Unpin + Send,
{
    sink.append_lines(&summary_lines(state, config))
        .await
        .map_err(|source| AppError::output(OutputError::WriteSummary { source }))?;
    sink.flush()
        .await
        .map_err(|source| AppError::output(OutputError::Flush { source }))
}

fn format_millis(value: Option<Duration>) -> String {
    value.map_or_else(|| "- ms".to_owned(), |duration| format!("{}ms", duration.as_millis()))
}

fn format_timestamp(value: Option<DateTime<Local>>) -> String {
    value.map_or_else(|| "-".to_owned(), |ts| ts.format(TIMESTAMP_FORMAT).to_string())
}
