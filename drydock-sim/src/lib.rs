//! # drydock-sim
//!
//! Deterministic simulation engine for the drydock dry-run harness.
//!
//! Provides a logical-time event loop ([`SimWorld`]) plus simulation
//! implementations of the `drydock-core` provider traits, so the stub
//! tasks run without wall-clock waits and replay identically for a given
//! seed:
//!
//! - [`SimTimeProvider`]: sleeps advance logical time through the event
//!   queue instead of blocking
//! - [`SimRandomProvider`]: explicitly seeded ChaCha8 stream; no global
//!   or thread-local random state
//! - [`ScriptedRandomProvider`]: pins or scripts outcomes for tests
//! - [`TrialBuilder`]: runs a workload across many seeds and reports
//!   outcome frequencies

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]

mod events;
mod providers;
mod runner;
mod sleep;
mod world;

pub use drydock_core::{SimulationError, SimulationResult};

pub use events::{Event, EventQueue, ScheduledEvent};
pub use providers::{
    ScriptedProviders, ScriptedRandomProvider, SimProviders, SimRandomProvider, SimTimeProvider,
};
pub use runner::{TrialBuilder, TrialReport, run_to_completion};
pub use sleep::SleepFuture;
pub use world::{SimWorld, WeakSimWorld};
