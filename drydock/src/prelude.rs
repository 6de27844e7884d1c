//! Prelude module for common drydock imports.
//!
//! Re-exports the types and traits most call sites need, so getting
//! started is a single glob import:
//!
//! ```rust,ignore
//! use drydock::prelude::*;
//!
//! let deploy = DeploymentSimulator::new(TokioProviders::new());
//! ```

pub use crate::ops::{
    ConfigurationValidator, DeploymentSimulator, ServiceStatus, ServiceStatusChecker,
};
pub use crate::profile::DelayProfile;

pub use drydock_core::{
    Providers, RandomProvider, TimeError, TimeProvider, TokioProviders, TokioRandomProvider,
    TokioTimeProvider,
};

pub use std::time::Duration;
