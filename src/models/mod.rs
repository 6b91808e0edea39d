mod accumulator_matrix;
mod body;
mod body_store;

pub use accumulator_matrix::*;
pub use body::*;
pub use body_store::*;

#[cfg(test)]
mod accumulator_matrix_tests;
