//! Provider bundle trait for simplified type parameters.
//!
//! The tasks need both a time source and a randomness source. Carrying
//! two type parameters (plus their bounds) through every task type gets
//! noisy fast, so the pair is bundled behind a single [`Providers`]
//! parameter with associated types.

use crate::{RandomProvider, TimeProvider, TokioRandomProvider, TokioTimeProvider};

/// Bundle of provider types for a runtime environment.
///
/// ## Implementations
///
/// - [`TokioProviders`]: production providers over real time and a
///   thread-local RNG
/// - `SimProviders` / `ScriptedProviders` (in `drydock-sim`): logical
///   time and seeded or scripted randomness for deterministic tests
pub trait Providers: Clone + 'static {
    /// Time provider type for sleep, timeout, and time queries.
    type Time: TimeProvider + 'static;

    /// Random provider type for outcome sampling.
    type Random: RandomProvider + 'static;

    /// Get the time provider instance.
    fn time(&self) -> &Self::Time;

    /// Get the random provider instance.
    fn random(&self) -> &Self::Random;
}

/// Production providers over the Tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioProviders {
    time: TokioTimeProvider,
    random: TokioRandomProvider,
}

impl TokioProviders {
    /// Create a new production providers bundle.
    pub fn new() -> Self {
        Self {
            time: TokioTimeProvider::new(),
            random: TokioRandomProvider::new(),
        }
    }
}

impl Default for TokioProviders {
    fn default() -> Self {
        Self::new()
    }
}

impl Providers for TokioProviders {
    type Time = TokioTimeProvider;
    type Random = TokioRandomProvider;

    fn time(&self) -> &Self::Time {
        &self.time
    }

    fn random(&self) -> &Self::Random {
        &self.random
    }
}
