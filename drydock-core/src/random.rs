//! Random number generation provider abstraction.
//!
//! The stub tasks never inspect their inputs; every observable outcome is
//! drawn from a fixed finite set through this trait. Injecting the source
//! here is what lets tests pin outcomes deterministically instead of
//! monkey-patching global random state.

use rand::distr::{Distribution, StandardUniform, uniform::SampleUniform};
use rand::prelude::*;
use std::cell::RefCell;
use std::ops::Range;

/// Provider trait for random number generation.
///
/// Implementations decide where randomness comes from: the production
/// [`TokioRandomProvider`] samples a thread-local RNG, while the
/// simulation providers replay an explicitly seeded stream.
pub trait RandomProvider: Clone {
    /// Generate a random value of type `T`.
    fn random<T>(&self) -> T
    where
        StandardUniform: Distribution<T>;

    /// Generate a random value within a range (exclusive upper bound).
    fn random_range<T>(&self, range: Range<T>) -> T
    where
        T: SampleUniform + PartialOrd;

    /// Generate a random f64 in `[0.0, 1.0)`.
    fn random_ratio(&self) -> f64;

    /// Generate a random bool that is `true` with the given probability.
    fn random_bool(&self, probability: f64) -> bool;

    /// Choose a uniformly random element from a slice.
    ///
    /// This is the "pick one of N labeled outcomes" operation the stub
    /// tasks are built on.
    ///
    /// # Panics
    ///
    /// Panics if the slice is empty.
    fn choice<'a, T>(&self, items: &'a [T]) -> &'a T {
        assert!(!items.is_empty(), "cannot choose from an empty slice");
        let idx = self.random_range(0..items.len());
        &items[idx]
    }
}

/// Production random provider using a thread-local RNG.
///
/// Uses `rand::rng()` (non-cryptographic) for efficient sampling outside
/// of simulation.
#[derive(Debug, Clone, Default)]
pub struct TokioRandomProvider;

impl TokioRandomProvider {
    /// Create a new production random provider.
    pub fn new() -> Self {
        Self
    }
}

thread_local! {
    static RNG: RefCell<rand::rngs::ThreadRng> = RefCell::new(rand::rng());
}

impl RandomProvider for TokioRandomProvider {
    fn random<T>(&self) -> T
    where
        StandardUniform: Distribution<T>,
    {
        RNG.with(|rng| rng.borrow_mut().random())
    }

    fn random_range<T>(&self, range: Range<T>) -> T
    where
        T: SampleUniform + PartialOrd,
    {
        RNG.with(|rng| rng.borrow_mut().random_range(range))
    }

    fn random_ratio(&self) -> f64 {
        RNG.with(|rng| rng.borrow_mut().random())
    }

    fn random_bool(&self, probability: f64) -> bool {
        self.random_ratio() < probability
    }
}
