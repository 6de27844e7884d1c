//! Simulated service status check.

use serde::Serialize;
use std::fmt;
use std::time::Duration;

use drydock_core::{Providers, RandomProvider, TimeError, TimeProvider};

use crate::profile::DelayProfile;

/// The fixed outcome set of a status check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    /// The service is up and serving.
    Running,
    /// The service is deliberately not running.
    Stopped,
    /// The service crashed or is otherwise unhealthy.
    Failed,
}

impl ServiceStatus {
    /// All possible statuses, in sampling order.
    pub const ALL: [ServiceStatus; 3] = [
        ServiceStatus::Running,
        ServiceStatus::Stopped,
        ServiceStatus::Failed,
    ];

    /// The lowercase label for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Running => "running",
            ServiceStatus::Stopped => "stopped",
            ServiceStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Simulates checking the status of a named service.
///
/// The service name is logged but never resolved to anything; the
/// outcome is drawn uniformly from [`ServiceStatus::ALL`] after the
/// simulated check delay.
#[derive(Debug, Clone)]
pub struct ServiceStatusChecker<P: Providers> {
    providers: P,
    delay: Duration,
}

impl<P: Providers> ServiceStatusChecker<P> {
    /// Create a checker with the default delay profile.
    pub fn new(providers: P) -> Self {
        Self::with_profile(providers, &DelayProfile::default())
    }

    /// Create a checker with delays taken from `profile`.
    pub fn with_profile(providers: P, profile: &DelayProfile) -> Self {
        Self {
            providers,
            delay: profile.status_check,
        }
    }

    /// Simulate checking the status of `service`.
    ///
    /// Any service name is accepted, including the empty string and
    /// names no service has ever had; all are treated identically.
    pub async fn check(&self, service: &str) -> Result<ServiceStatus, TimeError> {
        tracing::info!(service, "checking service status");
        self.providers.time().sleep(self.delay).await?;

        let status = *self.providers.random().choice(&ServiceStatus::ALL);
        tracing::info!(service, status = %status, "service status checked");
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drydock_core::TokioProviders;

    #[test]
    fn status_labels_are_lowercase() {
        assert_eq!(ServiceStatus::Running.to_string(), "running");
        assert_eq!(ServiceStatus::Stopped.to_string(), "stopped");
        assert_eq!(ServiceStatus::Failed.to_string(), "failed");
    }

    #[test]
    fn all_covers_three_distinct_statuses() {
        assert_eq!(ServiceStatus::ALL.len(), 3);
        assert_ne!(ServiceStatus::ALL[0], ServiceStatus::ALL[1]);
        assert_ne!(ServiceStatus::ALL[1], ServiceStatus::ALL[2]);
        assert_ne!(ServiceStatus::ALL[0], ServiceStatus::ALL[2]);
    }

    #[test]
    fn status_serializes_to_its_label() {
        let json = serde_json::to_string(&ServiceStatus::Failed).expect("serialize");
        assert_eq!(json, "\"failed\"");
    }

    #[tokio::test(start_paused = true)]
    async fn check_returns_a_member_of_the_outcome_set() {
        let checker = ServiceStatusChecker::new(TokioProviders::new());
        let status = checker.check("web").await.expect("check failed");
        assert!(ServiceStatus::ALL.contains(&status));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_service_name_is_accepted() {
        let checker = ServiceStatusChecker::new(TokioProviders::new());
        let status = checker.check("").await.expect("check failed");
        assert!(ServiceStatus::ALL.contains(&status));
    }
}
