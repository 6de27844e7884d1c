//! The simulated operational tasks.
//!
//! Each task is a leaf: stateless, independent of the others, and total
//! over its input. The shared shape is announce, sleep through the time
//! provider, sample the outcome through the random provider, announce
//! again, return. A semantically negative result (failed deploy, stopped
//! service, invalid configuration) is an ordinary return value, never an
//! error; the only error any task surfaces is a shut-down time provider.

mod config;
mod deploy;
mod status;

pub use config::ConfigurationValidator;
pub use deploy::DeploymentSimulator;
pub use status::{ServiceStatus, ServiceStatusChecker};
