//! Force phase of a simulation step: the pairwise kernel and the reduction of
//! per-worker partial accelerations.

mod force_kernel;
mod reduction;

pub use force_kernel::*;
pub use reduction::*;

#[cfg(test)]
mod force_kernel_tests;
#[cfg(test)]
mod reduction_tests;
