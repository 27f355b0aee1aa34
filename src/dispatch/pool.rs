use std::future::Future;
use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::{JoinError, JoinSet};
use tracing::error;

/// In-flight request tasks, bounded by a semaphore.
///
/// Finished tasks are reaped on every admission, so the set stays near
/// `capacity` entries however long the plan is.
pub(super) struct TaskPool {
    slots: Arc<Semaphore>,
    tasks: JoinSet<()>,
}

impl TaskPool {
    pub(super) fn new(capacity: usize) -> Self {
        Self {
            slots: Arc::new(Semaphore::new(capacity)),
            tasks: JoinSet::new(),
        }
    }

    /// Waits for a free slot. Returns `None` if the limiter was closed.
    pub(super) async fn admit(&mut self) -> Option<OwnedSemaphorePermit> {
        let permit = match Arc::clone(&self.slots).acquire_owned().await {
            Ok(permit) => permit,
            Err(err) => {
                error!("Concurrency limiter closed unexpectedly: {}", err);
                return None;
            }
        };
        while let Some(joined) = self.tasks.try_join_next() {
            report(joined);
        }
        Some(permit)
    }

    /// Spawns `task`, releasing `permit` when it completes or panics.
    pub(super) fn spawn<F>(&mut self, permit: OwnedSemaphorePermit, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tasks.spawn(async move {
            let _permit = permit;
            task.await;
        });
    }

    /// Tasks spawned and not yet reaped.
    pub(super) fn tracked(&self) -> usize {
        self.tasks.len()
    }

    pub(super) async fn drain(&mut self) {
        while let Some(joined) = self.tasks.join_next().await {
            report(joined);
        }
    }
}

fn report(joined: Result<(), JoinError>) {
    if let Err(err) = joined {
        error!("Request task failed: {}", err);
    }
}
