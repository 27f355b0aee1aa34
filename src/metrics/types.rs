use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Local};

/// Status recorded when no HTTP response was obtained. Real status codes
/// start at 100, so this never collides with one.
pub const TRANSPORT_FAILURE_STATUS: u16 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOutcome {
    pub status_code: u16,
    pub elapsed: Duration,
    pub message: String,
    pub started_at: DateTime<Local>,
}

impl RequestOutcome {
    #[must_use]
    pub fn transport_failure(started_at: DateTime<Local>, elapsed: Duration, message: String) -> Self {
        Self {
            status_code: TRANSPORT_FAILURE_STATUS,
            elapsed,
            message,
            started_at,
        }
    }

    #[must_use]
    pub const fn is_transport_failure(&self) -> bool {
        self.status_code == TRANSPORT_FAILURE_STATUS
    }
}

/// Aggregate state of one run.
///
/// `request_count`, the sum of `status_code_counts` and the length of
/// `response_times` always agree.
#[derive(Debug, Clone)]
pub struct MetricsState {
    pub request_count: u64,
    pub status_code_counts: BTreeMap<u16, u64>,
    pub response_times: Vec<Duration>,
    pub response_times_by_code: BTreeMap<u16, Vec<Duration>>,
    pub started_at: DateTime<Local>,
    pub finished_at: Option<DateTime<Local>>,
    /// Monotonic run length, set when the run is finalized.
    pub duration: Option<Duration>,
}

impl MetricsState {
    #[must_use]
    pub fn new(started_at: DateTime<Local>) -> Self {
        Self {
            request_count: 0,
            status_code_counts: BTreeMap::new(),
            response_times: Vec::new(),
            response_times_by_code: BTreeMap::new(),
            started_at,
            finished_at: None,
            duration: None,
        }
    }

    pub(super) fn apply(&mut self, status_code: u16, elapsed: Duration) {
        self.request_count = self.request_count.saturating_add(1);
        let count = self.status_code_counts.entry(status_code).or_insert(0);
        *count = count.saturating_add(1);
        self.response_times.push(elapsed);
        self.response_times_by_code
            .entry(status_code)
            .or_default()
            .push(elapsed);
    }

    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let status_total = self
            .status_code_counts
            .values()
            .fold(0u64, |acc, count| acc.saturating_add(*count));
        let by_code_total: usize = self.response_times_by_code.values().map(Vec::len).sum();
        let times = u64::try_from(self.response_times.len()).unwrap_or(u64::MAX);
        self.request_count == status_total
            && self.request_count == times
            && by_code_total == self.response_times.len()
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }
}
