mod aligned_buffer;
mod constants;
mod constants_config;
pub mod errors;
mod math_helpers;

pub use aligned_buffer::*;
pub use constants::*;
pub use constants_config::*;
pub use errors::SimulationError;
pub use math_helpers::*;

#[cfg(test)]
mod constants_config_tests;
