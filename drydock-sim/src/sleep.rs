//! Sleep futures over simulation time.
//!
//! A sleep schedules a timer event at creation and completes once the
//! event loop has processed that event; no wall-clock waiting occurs.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use drydock_core::SimulationResult;

use crate::world::WeakSimWorld;

/// Future that completes after a specified simulation-time duration.
///
/// Created by `SimWorld::sleep`; completes with `Ok(())` once the
/// corresponding timer event has been processed, or with
/// `Err(SimulationError::ShutDown)` if the world was dropped first.
pub struct SleepFuture {
    sim: WeakSimWorld,
    task_id: u64,
    completed: bool,
}

impl SleepFuture {
    pub(crate) fn new(sim: WeakSimWorld, task_id: u64) -> Self {
        Self {
            sim,
            task_id,
            completed: false,
        }
    }
}

impl Future for SleepFuture {
    type Output = SimulationResult<()>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.completed {
            return Poll::Ready(Ok(()));
        }

        match self.sim.is_task_awake(self.task_id) {
            Ok(true) => {
                self.completed = true;
                Poll::Ready(Ok(()))
            }
            Ok(false) => match self.sim.register_task_waker(self.task_id, cx.waker().clone()) {
                Ok(()) => Poll::Pending,
                Err(e) => Poll::Ready(Err(e)),
            },
            Err(e) => Poll::Ready(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::SimWorld;
    use std::time::Duration;

    #[test]
    fn sleep_completes_after_step() {
        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("failed to build runtime");
        let local = tokio::task::LocalSet::new();

        rt.block_on(local.run_until(async {
            let mut sim = SimWorld::new();
            let handle = tokio::task::spawn_local(sim.sleep(Duration::from_secs(5)));

            // Let the future register its waker before stepping.
            tokio::task::yield_now().await;
            assert!(!handle.is_finished());

            sim.step();
            tokio::task::yield_now().await;

            assert!(handle.is_finished());
            handle.await.expect("sleep task panicked").expect("sleep failed");
            assert_eq!(sim.current_time(), Duration::from_secs(5));
        }));
    }

    #[test]
    fn sleep_fails_once_world_is_dropped() {
        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("failed to build runtime");
        let local = tokio::task::LocalSet::new();

        rt.block_on(local.run_until(async {
            let sim = SimWorld::new();
            let sleep = sim.sleep(Duration::from_secs(1));
            drop(sim);

            let result = sleep.await;
            assert_eq!(result, Err(drydock_core::SimulationError::ShutDown));
        }));
    }
}
