//! Simulation random providers.
//!
//! [`SimRandomProvider`] carries an explicitly seeded generator: the seed
//! is passed at construction and the generator travels with the provider,
//! so there is no process-wide or thread-local random state to reset
//! between runs. Clones share one stream, which keeps a simulation's
//! sampling order deterministic no matter how many handles exist.
//!
//! [`ScriptedRandomProvider`] is the deterministic test stub: it pins or
//! scripts the outcome-shaped samples (`random_bool`, `choice`) while
//! falling back to a seeded stream for everything else.

use rand::SeedableRng;
use rand::distr::{Distribution, StandardUniform, uniform::SampleUniform};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::ops::Range;
use std::rc::Rc;

use drydock_core::RandomProvider;

/// Deterministic random provider seeded at construction.
///
/// The same seed always replays the same sample sequence, which is what
/// makes whole simulation runs reproducible from a single `u64`.
#[derive(Debug, Clone)]
pub struct SimRandomProvider {
    rng: Rc<RefCell<ChaCha8Rng>>,
    seed: u64,
}

impl SimRandomProvider {
    /// Create a new provider seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Rc::new(RefCell::new(ChaCha8Rng::seed_from_u64(seed))),
            seed,
        }
    }

    /// The seed this provider was constructed with, for error reporting
    /// and replay.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomProvider for SimRandomProvider {
    fn random<T>(&self) -> T
    where
        StandardUniform: Distribution<T>,
    {
        self.rng.borrow_mut().random()
    }

    fn random_range<T>(&self, range: Range<T>) -> T
    where
        T: SampleUniform + PartialOrd,
    {
        self.rng.borrow_mut().random_range(range)
    }

    fn random_ratio(&self) -> f64 {
        self.rng.borrow_mut().random()
    }

    fn random_bool(&self, probability: f64) -> bool {
        self.random_ratio() < probability
    }
}

#[derive(Debug, Default)]
struct Script {
    bools: VecDeque<bool>,
    choices: VecDeque<usize>,
    pinned_bool: Option<bool>,
    pinned_choice: Option<usize>,
}

/// Random provider with scripted outcomes for tests.
///
/// `random_bool` and `choice` consume scripted values first (FIFO), then
/// fall back to a pinned value if one was set, then to a seeded stream.
/// Samples that do not shape task outcomes (`random`, `random_range`,
/// `random_ratio`) always come from the fallback stream.
///
/// Clones share the script, so a provider handed to a task bundle keeps
/// honoring values pushed through the original handle.
#[derive(Debug, Clone)]
pub struct ScriptedRandomProvider {
    script: Rc<RefCell<Script>>,
    fallback: Rc<RefCell<ChaCha8Rng>>,
}

impl ScriptedRandomProvider {
    /// Create a provider with an empty script and a zero-seeded fallback.
    pub fn new() -> Self {
        Self {
            script: Rc::new(RefCell::new(Script::default())),
            fallback: Rc::new(RefCell::new(ChaCha8Rng::seed_from_u64(0))),
        }
    }

    /// Create a provider whose every `random_bool` answer is `value`.
    pub fn always_bool(value: bool) -> Self {
        let provider = Self::new();
        provider.script.borrow_mut().pinned_bool = Some(value);
        provider
    }

    /// Create a provider whose every `choice` picks the element at
    /// `index`.
    pub fn always_choice(index: usize) -> Self {
        let provider = Self::new();
        provider.script.borrow_mut().pinned_choice = Some(index);
        provider
    }

    /// Queue a single `random_bool` answer.
    pub fn push_bool(&self, value: bool) {
        self.script.borrow_mut().bools.push_back(value);
    }

    /// Queue a single `choice` index.
    pub fn push_choice(&self, index: usize) {
        self.script.borrow_mut().choices.push_back(index);
    }
}

impl Default for ScriptedRandomProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomProvider for ScriptedRandomProvider {
    fn random<T>(&self) -> T
    where
        StandardUniform: Distribution<T>,
    {
        self.fallback.borrow_mut().random()
    }

    fn random_range<T>(&self, range: Range<T>) -> T
    where
        T: SampleUniform + PartialOrd,
    {
        self.fallback.borrow_mut().random_range(range)
    }

    fn random_ratio(&self) -> f64 {
        self.fallback.borrow_mut().random()
    }

    fn random_bool(&self, probability: f64) -> bool {
        let mut script = self.script.borrow_mut();
        if let Some(value) = script.bools.pop_front() {
            return value;
        }
        if let Some(value) = script.pinned_bool {
            return value;
        }
        drop(script);
        self.random_ratio() < probability
    }

    fn choice<'a, T>(&self, items: &'a [T]) -> &'a T {
        assert!(!items.is_empty(), "cannot choose from an empty slice");

        let mut script = self.script.borrow_mut();
        let scripted = script.choices.pop_front().or(script.pinned_choice);
        drop(script);

        match scripted {
            Some(index) => {
                assert!(
                    index < items.len(),
                    "scripted choice index {index} out of range for {} items",
                    items.len()
                );
                &items[index]
            }
            None => {
                let index = self.random_range(0..items.len());
                &items[index]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_replays_same_sequence() {
        let a = SimRandomProvider::new(42);
        let values: Vec<f64> = (0..5).map(|_| a.random_ratio()).collect();

        let b = SimRandomProvider::new(42);
        for value in values {
            assert_eq!(value, b.random_ratio());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let a = SimRandomProvider::new(1);
        let b = SimRandomProvider::new(2);
        assert_ne!(a.random_ratio(), b.random_ratio());
    }

    #[test]
    fn clones_share_one_stream() {
        let a = SimRandomProvider::new(7);
        let b = a.clone();

        // Interleaved draws through both handles must match a single
        // provider drawing the same count.
        let interleaved = [a.random_ratio(), b.random_ratio(), a.random_ratio()];

        let reference = SimRandomProvider::new(7);
        for value in interleaved {
            assert_eq!(value, reference.random_ratio());
        }
    }

    #[test]
    fn range_sampling_is_deterministic() {
        let a = SimRandomProvider::new(123);
        let first = a.random_range(100..1000);

        let b = SimRandomProvider::new(123);
        assert_eq!(first, b.random_range(100..1000));
    }

    #[test]
    fn seed_accessor_reports_construction_seed() {
        assert_eq!(SimRandomProvider::new(12345).seed(), 12345);
    }

    #[test]
    fn pinned_bool_answers_every_call() {
        let random = ScriptedRandomProvider::always_bool(true);
        for _ in 0..10 {
            assert!(random.random_bool(0.0));
        }

        let random = ScriptedRandomProvider::always_bool(false);
        for _ in 0..10 {
            assert!(!random.random_bool(1.0));
        }
    }

    #[test]
    fn pinned_choice_picks_fixed_index() {
        let random = ScriptedRandomProvider::always_choice(1);
        let items = ["running", "stopped", "failed"];
        for _ in 0..10 {
            assert_eq!(*random.choice(&items), "stopped");
        }
    }

    #[test]
    fn queued_values_drain_before_pin() {
        let random = ScriptedRandomProvider::always_bool(false);
        random.push_bool(true);
        random.push_bool(true);

        assert!(random.random_bool(0.5));
        assert!(random.random_bool(0.5));
        assert!(!random.random_bool(0.5));
    }

    #[test]
    fn queued_choices_drain_in_order() {
        let random = ScriptedRandomProvider::new();
        random.push_choice(2);
        random.push_choice(0);

        let items = ["a", "b", "c"];
        assert_eq!(*random.choice(&items), "c");
        assert_eq!(*random.choice(&items), "a");
    }

    #[test]
    fn clones_share_the_script() {
        let random = ScriptedRandomProvider::new();
        let clone = random.clone();
        random.push_bool(true);

        assert!(clone.random_bool(0.0));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn scripted_index_beyond_slice_panics() {
        let random = ScriptedRandomProvider::always_choice(5);
        random.choice(&["only", "two"]);
    }
}
