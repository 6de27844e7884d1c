//! Simulation provider bundles.

use drydock_core::Providers;

use crate::world::WeakSimWorld;

use super::{ScriptedRandomProvider, SimRandomProvider, SimTimeProvider};

/// Simulation providers bundle for deterministic testing.
///
/// Pairs logical time from a [`crate::SimWorld`] with a seeded random
/// stream, so a whole run replays from `(world, seed)`.
#[derive(Debug, Clone)]
pub struct SimProviders {
    time: SimTimeProvider,
    random: SimRandomProvider,
}

impl SimProviders {
    /// Create a new simulation providers bundle.
    ///
    /// # Arguments
    ///
    /// * `sim` - Weak reference to the simulation world
    /// * `seed` - Seed for deterministic random number generation
    pub fn new(sim: WeakSimWorld, seed: u64) -> Self {
        Self {
            time: SimTimeProvider::new(sim),
            random: SimRandomProvider::new(seed),
        }
    }
}

impl Providers for SimProviders {
    type Time = SimTimeProvider;
    type Random = SimRandomProvider;

    fn time(&self) -> &Self::Time {
        &self.time
    }

    fn random(&self) -> &Self::Random {
        &self.random
    }
}

/// Simulation providers bundle with scripted randomness.
///
/// Same logical time as [`SimProviders`], but outcomes come from a
/// [`ScriptedRandomProvider`] so tests can pin exactly what each task
/// returns.
#[derive(Debug, Clone)]
pub struct ScriptedProviders {
    time: SimTimeProvider,
    random: ScriptedRandomProvider,
}

impl ScriptedProviders {
    /// Create a scripted providers bundle around an existing scripted
    /// random provider.
    pub fn new(sim: WeakSimWorld, random: ScriptedRandomProvider) -> Self {
        Self {
            time: SimTimeProvider::new(sim),
            random,
        }
    }
}

impl Providers for ScriptedProviders {
    type Time = SimTimeProvider;
    type Random = ScriptedRandomProvider;

    fn time(&self) -> &Self::Time {
        &self.time
    }

    fn random(&self) -> &Self::Random {
        &self.random
    }
}
