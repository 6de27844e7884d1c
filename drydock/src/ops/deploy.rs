//! Simulated application deployment.

use std::time::Duration;

use drydock_core::{Providers, RandomProvider, TimeError, TimeProvider};

use crate::profile::DelayProfile;

/// Simulates deploying a named application version.
///
/// The version label is logged but never interpreted; the outcome is a
/// uniformly random success flag drawn after the simulated deployment
/// delay.
#[derive(Debug, Clone)]
pub struct DeploymentSimulator<P: Providers> {
    providers: P,
    delay: Duration,
}

impl<P: Providers> DeploymentSimulator<P> {
    /// Create a simulator with the default delay profile.
    pub fn new(providers: P) -> Self {
        Self::with_profile(providers, &DelayProfile::default())
    }

    /// Create a simulator with delays taken from `profile`.
    pub fn with_profile(providers: P, profile: &DelayProfile) -> Self {
        Self {
            providers,
            delay: profile.deploy,
        }
    }

    /// Simulate deploying `version`.
    ///
    /// Returns `true` for a successful deployment, `false` for a failed
    /// one, each with equal probability. Any version label is accepted,
    /// including the empty string, and none affects the outcome.
    pub async fn deploy(&self, version: &str) -> Result<bool, TimeError> {
        tracing::info!(version, "deploying application");
        self.providers.time().sleep(self.delay).await?;

        let succeeded = self.providers.random().random_bool(0.5);
        if succeeded {
            tracing::info!(version, "deployment succeeded");
        } else {
            tracing::warn!(version, "deployment failed");
        }
        Ok(succeeded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drydock_core::TokioProviders;

    #[tokio::test(start_paused = true)]
    async fn deploy_returns_without_real_delay() {
        let deploy = DeploymentSimulator::new(TokioProviders::new());
        // Either outcome is acceptable; the call must complete.
        let _succeeded = deploy.deploy("1.0").await.expect("deploy failed");
    }

    #[tokio::test(start_paused = true)]
    async fn empty_version_is_accepted() {
        let deploy = DeploymentSimulator::new(TokioProviders::new());
        let _succeeded = deploy.deploy("").await.expect("deploy failed");
    }
}
