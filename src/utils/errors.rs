use std::fmt;
use std::error::Error;

use crate::simd::PolicyKind;

/// Represents errors that can occur while constructing a simulation.
///
/// Only construction can fail. Once a simulation exists, stepping it is infallible:
/// numerical edge cases are absorbed by the softening term and allocation failure
/// aborts the process.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Indicates a body count of zero or above the supported maximum.
    InvalidBodyCount(usize),
    /// Indicates a fixed time step that is not a positive, finite number.
    InvalidTimeStep(f32),
    /// Indicates an explicit worker count of zero.
    InvalidWorkerCount(usize),
    /// Indicates that the accumulator matrices would not fit in the address space.
    AllocationTooLarge { bodies: usize, workers: usize },
    /// Indicates that a requested SIMD policy is not supported by this host or build.
    PolicyUnavailable(PolicyKind),
    /// Indicates that the worker thread pool could not be started.
    ThreadPool(String),
    /// Indicates explicit body data that is inconsistent or not physical.
    InvalidBodyData(String),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SimulationError::InvalidBodyCount(n) => write!(f, "Invalid body count: {}", n),
            SimulationError::InvalidTimeStep(dt) => write!(f, "Invalid fixed time step: {}", dt),
            SimulationError::InvalidWorkerCount(n) => write!(f, "Invalid worker count: {}", n),
            SimulationError::AllocationTooLarge { bodies, workers } => write!(
                f,
                "Accumulators for {} bodies across {} workers exceed the addressable size",
                bodies, workers
            ),
            SimulationError::PolicyUnavailable(kind) => {
                write!(f, "SIMD policy {} is not available on this host", kind.name())
            }
            SimulationError::ThreadPool(msg) => write!(f, "Thread pool error: {}", msg),
            SimulationError::InvalidBodyData(msg) => write!(f, "Invalid body data: {}", msg),
        }
    }
}

impl Error for SimulationError {}
