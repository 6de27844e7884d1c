//! Error types shared between the providers and the simulation engine.

use thiserror::Error;

/// Errors surfaced by the simulation engine and its handles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// The simulation world has been dropped and handles can no longer
    /// reach it.
    #[error("simulation has shut down")]
    ShutDown,

    /// The simulation reached a state it cannot make progress from,
    /// such as a workload stalled with no scheduled events.
    #[error("invalid simulation state: {0}")]
    InvalidState(String),
}

/// Result alias for simulation operations.
pub type SimulationResult<T> = Result<T, SimulationError>;
