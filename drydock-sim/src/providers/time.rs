//! Simulation time provider implementation.

use async_trait::async_trait;
use std::time::Duration;

use drydock_core::{TimeError, TimeProvider};

use crate::world::WeakSimWorld;

/// Simulation time provider that advances logical time through the
/// event queue instead of sleeping for real.
#[derive(Debug, Clone)]
pub struct SimTimeProvider {
    sim: WeakSimWorld,
}

impl SimTimeProvider {
    /// Create a new simulation time provider.
    pub fn new(sim: WeakSimWorld) -> Self {
        Self { sim }
    }
}

#[async_trait(?Send)]
impl TimeProvider for SimTimeProvider {
    async fn sleep(&self, duration: Duration) -> Result<(), TimeError> {
        let sleep_future = self.sim.sleep(duration).map_err(|_| TimeError::Shutdown)?;
        let _ = sleep_future.await;
        Ok(())
    }

    fn now(&self) -> Duration {
        self.sim.now().unwrap_or(Duration::ZERO)
    }

    async fn timeout<F, T>(&self, duration: Duration, future: F) -> Result<T, TimeError>
    where
        F: std::future::Future<Output = T>,
    {
        let sleep_future = self.sim.sleep(duration).map_err(|_| TimeError::Shutdown)?;

        // Both branches run on simulation time through the event queue.
        tokio::select! {
            result = future => Ok(result),
            _ = sleep_future => Err(TimeError::Elapsed),
        }
    }
}
