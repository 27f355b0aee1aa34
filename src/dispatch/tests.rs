use super::pool::TaskPool;
use super::*;
use crate::args::{CaptureMode, PositiveUsize};
use crate::http::Execute;
use crate::metrics::{LogSink, RequestOutcome, TRANSPORT_FAILURE_STATUS};
use crate::plan::{RequestDescriptor, build_plan};
use async_trait::async_trait;
use chrono::Local;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn run_async_test<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}

fn positive(value: usize) -> Result<PositiveUsize, String> {
    PositiveUsize::try_from(value).map_err(|err| err.to_string())
}

fn numbered_plan(count: usize) -> Vec<RequestDescriptor> {
    (0..count)
        .map(|index| RequestDescriptor {
            url: format!("http://h/{}", index),
            data_parts: vec![index.to_string()],
        })
        .collect()
}

/// Records every call and the highest number of overlapping calls.
#[derive(Default)]
struct ProbeExecutor {
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    seen: Mutex<Vec<String>>,
    hold: Duration,
    fail_suffix: Option<&'static str>,
    panic_suffix: Option<&'static str>,
}

impl ProbeExecutor {
    fn holding(hold: Duration) -> Self {
        Self {
            hold,
            ..Self::default()
        }
    }

    fn seen(&self) -> Vec<String> {
        self.seen
            .lock()
            .map(|seen| seen.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Execute for ProbeExecutor {
    async fn execute(&self, descriptor: &RequestDescriptor) -> RequestOutcome {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst).saturating_add(1);
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(descriptor.url.clone());
        }
        tokio::time::sleep(self.hold).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self
            .panic_suffix
            .is_some_and(|suffix| descriptor.url.ends_with(suffix))
        {
            panic!("injected panic for {}", descriptor.url);
        }
        let started_at = Local::now();
        if self
            .fail_suffix
            .is_some_and(|suffix| descriptor.url.ends_with(suffix))
        {
            return RequestOutcome::transport_failure(
                started_at,
                self.hold,
                "error: connection refused".to_owned(),
            );
        }
        RequestOutcome {
            status_code: 200,
            elapsed: self.hold,
            message: "ok".to_owned(),
            started_at,
        }
    }
}

#[test]
fn state_machine_advances_to_done() -> Result<(), String> {
    let mut state = DispatchState::Idle;
    let mut visited = vec![state];
    while state != DispatchState::Done {
        state = state.next();
        visited.push(state);
    }
    let expected = [
        DispatchState::Idle,
        DispatchState::Running,
        DispatchState::Draining,
        DispatchState::Done,
    ];
    if visited != expected {
        return Err(format!("Unexpected transitions: {:?}", visited));
    }
    if DispatchState::Done.next() != DispatchState::Done {
        return Err("Done must be terminal".to_owned());
    }
    Ok(())
}

#[test]
fn never_exceeds_concurrency_ceiling() -> Result<(), String> {
    run_async_test(async {
        let executor = Arc::new(ProbeExecutor::holding(Duration::from_millis(30)));
        let sink = Arc::new(LogSink::new(Vec::<u8>::new(), CaptureMode::None));
        let dispatcher = Dispatcher::new(positive(2)?, Duration::ZERO);

        let metrics = dispatcher
            .run(numbered_plan(5), Arc::clone(&executor), sink)
            .await;

        let max = executor.max_in_flight.load(Ordering::SeqCst);
        if max > 2 {
            return Err(format!("Observed {} concurrent executions", max));
        }
        if metrics.request_count != 5 || !metrics.is_consistent() || !metrics.is_finished() {
            return Err(format!("Unexpected metrics: {:?}", metrics));
        }
        Ok(())
    })
}

#[test]
fn executes_each_descriptor_exactly_once() -> Result<(), String> {
    run_async_test(async {
        let executor = Arc::new(ProbeExecutor::holding(Duration::from_millis(1)));
        let sink = Arc::new(LogSink::new(Vec::<u8>::new(), CaptureMode::None));
        let dispatcher = Dispatcher::new(positive(8)?, Duration::ZERO);
        let plan = build_plan("http://h/{data1}", &["a".to_owned(), "b".to_owned()], 20);
        let mut expected: Vec<String> = plan.iter().map(|item| item.url.clone()).collect();

        let metrics = dispatcher.run(plan, Arc::clone(&executor), sink).await;

        let mut seen = executor.seen();
        seen.sort();
        expected.sort();
        if seen != expected {
            return Err(format!("Executed {} of {} descriptors", seen.len(), expected.len()));
        }
        if metrics.request_count != 40 {
            return Err(format!("Unexpected count: {}", metrics.request_count));
        }
        Ok(())
    })
}

#[test]
fn transport_failures_are_recorded_as_status_zero() -> Result<(), String> {
    run_async_test(async {
        let executor = Arc::new(ProbeExecutor {
            fail_suffix: Some("/1"),
            ..ProbeExecutor::default()
        });
        let sink = Arc::new(LogSink::new(Vec::<u8>::new(), CaptureMode::Simple));
        let dispatcher = Dispatcher::new(positive(3)?, Duration::ZERO);

        let metrics = dispatcher
            .run(numbered_plan(4), executor, Arc::clone(&sink))
            .await;

        if metrics.status_code_counts.get(&TRANSPORT_FAILURE_STATUS) != Some(&1) {
            return Err(format!("Unexpected counts: {:?}", metrics.status_code_counts));
        }
        if metrics.status_code_counts.get(&200) != Some(&3) {
            return Err(format!("Unexpected counts: {:?}", metrics.status_code_counts));
        }
        let sink = Arc::try_unwrap(sink).map_err(|_| "sink still shared".to_owned())?;
        let written = String::from_utf8(sink.into_inner())
            .map_err(|err| format!("utf8 failed: {}", err))?;
        if written.lines().count() != 4 || !written.contains("http://h/1\": 0:, ") {
            return Err(format!("Unexpected log: {}", written));
        }
        Ok(())
    })
}

#[test]
fn delay_is_applied_per_task() -> Result<(), String> {
    run_async_test(async {
        let executor = Arc::new(ProbeExecutor::default());
        let sink = Arc::new(LogSink::new(Vec::<u8>::new(), CaptureMode::None));
        let dispatcher = Dispatcher::new(positive(1)?, Duration::from_millis(40));

        let start = tokio::time::Instant::now();
        let metrics = dispatcher.run(numbered_plan(3), executor, sink).await;
        let elapsed = start.elapsed();

        if elapsed < Duration::from_millis(120) {
            return Err(format!("Delay not applied: {:?}", elapsed));
        }
        if metrics.request_count != 3 {
            return Err(format!("Unexpected count: {}", metrics.request_count));
        }
        Ok(())
    })
}

#[test]
fn panicking_task_does_not_stop_the_run() -> Result<(), String> {
    run_async_test(async {
        let executor = Arc::new(ProbeExecutor {
            panic_suffix: Some("/2"),
            ..ProbeExecutor::default()
        });
        let sink = Arc::new(LogSink::new(Vec::<u8>::new(), CaptureMode::None));
        let dispatcher = Dispatcher::new(positive(1)?, Duration::ZERO);

        let metrics = dispatcher
            .run(numbered_plan(5), Arc::clone(&executor), sink)
            .await;

        if executor.seen().len() != 5 {
            return Err(format!("Expected 5 executions, got {}", executor.seen().len()));
        }
        if metrics.request_count != 4 || !metrics.is_consistent() {
            return Err(format!("Unexpected metrics: {:?}", metrics));
        }
        Ok(())
    })
}

#[test]
fn empty_plan_finishes_with_no_requests() -> Result<(), String> {
    run_async_test(async {
        let executor = Arc::new(ProbeExecutor::default());
        let sink = Arc::new(LogSink::new(Vec::<u8>::new(), CaptureMode::Full));
        let dispatcher = Dispatcher::new(positive(4)?, Duration::ZERO);

        let metrics = dispatcher.run(Vec::new(), executor, sink).await;
        if metrics.request_count != 0 || !metrics.is_finished() {
            return Err(format!("Unexpected metrics: {:?}", metrics));
        }
        Ok(())
    })
}

#[test]
fn finished_tasks_are_reaped_during_submission() -> Result<(), String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(async {
        let capacity = 3;
        let completed = Arc::new(AtomicUsize::new(0));
        let mut pool = TaskPool::new(capacity);
        let mut peak = 0;

        for _ in 0..500 {
            let permit = pool.admit().await.ok_or("Limiter closed")?;
            let completed = Arc::clone(&completed);
            pool.spawn(permit, async move {
                tokio::time::sleep(Duration::from_micros(50)).await;
                completed.fetch_add(1, Ordering::SeqCst);
            });
            peak = peak.max(pool.tracked());
        }
        pool.drain().await;

        if peak > capacity {
            return Err(format!("Pool tracked {} tasks with capacity {}", peak, capacity));
        }
        if pool.tracked() != 0 || completed.load(Ordering::SeqCst) != 500 {
            return Err(format!(
                "Expected all tasks joined, {} tracked and {} completed",
                pool.tracked(),
                completed.load(Ordering::SeqCst)
            ));
        }
        Ok(())
    })
}
