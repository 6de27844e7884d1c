//! Simulated configuration validation.

use std::time::Duration;

use drydock_core::{Providers, RandomProvider, TimeError, TimeProvider};

use crate::profile::DelayProfile;

/// Simulates validating a named configuration file.
///
/// No file-system access occurs; the name is logged verbatim and the
/// verdict is a uniformly random validity flag drawn after the simulated
/// validation delay. A missing or nonsensical path behaves exactly like
/// any other input.
#[derive(Debug, Clone)]
pub struct ConfigurationValidator<P: Providers> {
    providers: P,
    delay: Duration,
}

impl<P: Providers> ConfigurationValidator<P> {
    /// Create a validator with the default delay profile.
    pub fn new(providers: P) -> Self {
        Self::with_profile(providers, &DelayProfile::default())
    }

    /// Create a validator with delays taken from `profile`.
    pub fn with_profile(providers: P, profile: &DelayProfile) -> Self {
        Self {
            providers,
            delay: profile.validation,
        }
    }

    /// Simulate validating `config_file`.
    ///
    /// Returns `true` for a valid configuration, `false` for an invalid
    /// one, each with equal probability.
    pub async fn validate(&self, config_file: &str) -> Result<bool, TimeError> {
        tracing::info!(config_file, "validating configuration");
        self.providers.time().sleep(self.delay).await?;

        let valid = self.providers.random().random_bool(0.5);
        if valid {
            tracing::info!(config_file, "configuration is valid");
        } else {
            tracing::warn!(config_file, "configuration is invalid");
        }
        Ok(valid)
    }
}
