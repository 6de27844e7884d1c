//! # drydock-core
//!
//! Core abstractions for the drydock dry-run harness.
//!
//! This crate provides the provider traits that let the simulated
//! operational tasks run unchanged against real time and real randomness
//! in production, or against logical time and seeded randomness under
//! deterministic simulation:
//!
//! - [`TimeProvider`]: sleep, timeout, and time queries
//! - [`RandomProvider`]: outcome sampling from finite sets
//! - [`Providers`]: a bundle of the above to keep type parameters flat
//!
//! The `Tokio*` types are the production implementations. Simulation
//! implementations live in `drydock-sim`.

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]

mod error;
mod providers;
mod random;
mod time;

pub use error::{SimulationError, SimulationResult};
pub use providers::{Providers, TokioProviders};
pub use random::{RandomProvider, TokioRandomProvider};
pub use time::{TimeError, TimeProvider, TokioTimeProvider};
