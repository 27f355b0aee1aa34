use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Local;
use tokio::time::Instant;

use super::types::{MetricsState, RequestOutcome};

/// Shared accumulator for outcomes from concurrently running requests.
///
/// Every outcome is applied under a single lock acquisition, so readers
/// never observe a partially recorded outcome.
#[derive(Debug)]
pub struct MetricsAggregator {
    run_start: Instant,
    state: Mutex<MetricsState>,
}

impl MetricsAggregator {
    /// Starts an empty run stamped with the current time.
    #[must_use]
    pub fn start() -> Self {
        Self {
            run_start: Instant::now(),
            state: Mutex::new(MetricsState::new(Local::now())),
        }
    }

    pub fn record(&self, outcome: &RequestOutcome) {
        self.lock().apply(outcome.status_code, outcome.elapsed);
    }

    /// Copy of the current state, for inspection while the run is in flight.
    #[must_use]
    pub fn snapshot(&self) -> MetricsState {
        self.lock().clone()
    }

    /// Stamps the end of the run and returns the finalized state.
    #[must_use]
    pub fn finish(&self) -> MetricsState {
        let mut state = self.lock();
        state.finished_at = Some(Local::now());
        state.duration = Some(self.run_start.elapsed());
        state.clone()
    }

    // Poisoning is ignored: `apply` never leaves a half-recorded outcome.
    fn lock(&self) -> MutexGuard<'_, MetricsState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
