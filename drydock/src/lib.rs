//! # drydock
//!
//! A deterministic dry-run harness for simulated operational tasks.
//!
//! Three stub operations — deploying an application, checking a
//! service's status, and validating a configuration file — each follow
//! the same shape: announce intent, wait a simulated duration, draw an
//! outcome uniformly from a fixed finite set, announce the outcome, and
//! return it. Nothing real happens: no processes, no sockets, no files.
//! The inputs are carried through log messages verbatim and never
//! interpreted.
//!
//! What makes the crate useful despite that is the provider seam: every
//! task is generic over a [`Providers`](drydock_core::Providers) bundle,
//! so the same code runs with real delays and real randomness in
//! production, or on logical time with seeded randomness under
//! `drydock-sim` for reproducible tests.
//!
//! ```rust,ignore
//! use drydock::prelude::*;
//!
//! let providers = TokioProviders::new();
//! let deploy = DeploymentSimulator::new(providers);
//! let succeeded = deploy.deploy("1.0.3").await?;
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]

pub mod ops;
pub mod prelude;
mod profile;

pub use ops::{ConfigurationValidator, DeploymentSimulator, ServiceStatus, ServiceStatusChecker};
pub use profile::DelayProfile;
