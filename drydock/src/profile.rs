//! Simulated-delay configuration for the operational tasks.

use std::time::Duration;

/// How long each task pretends to work.
///
/// The defaults mirror the latencies the tasks simulate in production
/// mode; [`fast_local`](DelayProfile::fast_local) shrinks them to
/// millisecond scale for wall-clock-bounded tests and demos. Under the
/// simulation engine the profile only determines how far logical time
/// advances, so even the default profile costs no real time there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelayProfile {
    /// Simulated duration of an application deployment.
    pub deploy: Duration,
    /// Simulated duration of a service status check.
    pub status_check: Duration,
    /// Simulated duration of a configuration validation.
    pub validation: Duration,
}

impl Default for DelayProfile {
    fn default() -> Self {
        Self {
            deploy: Duration::from_secs(2),
            status_check: Duration::from_secs(1),
            validation: Duration::from_secs(1),
        }
    }
}

impl DelayProfile {
    /// Millisecond-scale delays for tests and demos that run under real
    /// time but should finish promptly.
    pub fn fast_local() -> Self {
        Self {
            deploy: Duration::from_millis(20),
            status_check: Duration::from_millis(10),
            validation: Duration::from_millis(10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_matches_simulated_latencies() {
        let profile = DelayProfile::default();
        assert_eq!(profile.deploy, Duration::from_secs(2));
        assert_eq!(profile.status_check, Duration::from_secs(1));
        assert_eq!(profile.validation, Duration::from_secs(1));
    }

    #[test]
    fn fast_local_is_strictly_faster() {
        let fast = DelayProfile::fast_local();
        let default = DelayProfile::default();
        assert!(fast.deploy < default.deploy);
        assert!(fast.status_check < default.status_check);
        assert!(fast.validation < default.validation);
    }
}
