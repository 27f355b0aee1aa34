use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncWrite;
use tracing::{debug, warn};

use crate::args::PositiveUsize;
use crate::http::Execute;
use crate::metrics::{LogSink, MetricsAggregator, MetricsState};
use crate::plan::RequestDescriptor;

use super::pool::TaskPool;
use super::state::DispatchState;

/// Runs a plan with at most `concurrency` requests in flight.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher {
    concurrency: PositiveUsize,
    delay: Duration,
}

impl Dispatcher {
    #[must_use]
    pub const fn new(concurrency: PositiveUsize, delay: Duration) -> Self {
        Self { concurrency, delay }
    }

    /// Executes every descriptor exactly once and returns the finalized metrics.
    ///
    /// Descriptors are submitted in plan order. Submission waits for a free
    /// slot; each task then sleeps `delay`, executes, writes its log line and
    /// records the outcome. Transport failures arrive as status 0 outcomes,
    /// and a panicking task is logged without stopping the run.
    pub async fn run<E, W>(
        &self,
        plan: Vec<RequestDescriptor>,
        executor: Arc<E>,
        log_sink: Arc<LogSink<W>>,
    ) -> MetricsState
    where
        E: Execute + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let mut state = DispatchState::Idle;
        let aggregator = Arc::new(MetricsAggregator::start());
        let mut pool = TaskPool::new(self.concurrency.get());

        state = transition(state);
        for descriptor in plan {
            let Some(permit) = pool.admit().await else {
                break;
            };
            let executor = Arc::clone(&executor);
            let log_sink = Arc::clone(&log_sink);
            let aggregator = Arc::clone(&aggregator);
            let delay = self.delay;

            pool.spawn(permit, async move {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                let outcome = executor.execute(&descriptor).await;
                if let Err(err) = log_sink.record(&descriptor.url, &outcome).await {
                    warn!("Failed to write log line for {}: {}", descriptor.url, err);
                }
                aggregator.record(&outcome);
            });
        }

        state = transition(state);
        pool.drain().await;

        let metrics = aggregator.finish();
        transition(state);
        metrics
    }
}

fn transition(from: DispatchState) -> DispatchState {
    let to = from.next();
    debug!("Dispatcher {} -> {}", from, to);
    to
}
