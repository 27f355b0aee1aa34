use std::collections::BTreeMap;
use std::time::Duration;

use crate::metrics::MetricsState;

/// Derived figures for the summary block. Empty runs have no average,
/// shortest or longest time rather than a zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryStats {
    pub total_duration: Duration,
    pub average: Option<Duration>,
    pub shortest: Option<Duration>,
    pub longest: Option<Duration>,
    pub average_by_code: BTreeMap<u16, Duration>,
}

impl SummaryStats {
    #[must_use]
    pub fn from_state(state: &MetricsState) -> Self {
        let total_duration = state.duration.unwrap_or_else(|| {
            state
                .finished_at
                .and_then(|end| (end - state.started_at).to_std().ok())
                .unwrap_or_default()
        });
        let average_by_code = state
            .response_times_by_code
            .iter()
            .filter_map(|(code, times)| average(times).map(|avg| (*code, avg)))
            .collect();

        Self {
            total_duration,
            average: average(&state.response_times),
            shortest: state.response_times.iter().min().copied(),
            longest: state.response_times.iter().max().copied(),
            average_by_code,
        }
    }
}

fn average(times: &[Duration]) -> Option<Duration> {
    let count = u128::try_from(times.len()).ok().filter(|count| *count > 0)?;
    let total: u128 = times.iter().map(Duration::as_nanos).sum();
    let nanos = u64::try_from(total / count).unwrap_or(u64::MAX);
    Some(Duration::from_nanos(nanos))
}
