//! Brute-force 2D N-body gravity.
//!
//! Bodies live in a structure-of-arrays [`models::BodyStore`]. Each step computes
//! pairwise softened gravity with a kernel written once over [`simd::SimdPolicy`],
//! folds the per-worker partial accelerations into one row, and integrates with
//! semi-implicit Euler. [`simulation::Simulation`] ties the phases together.
pub mod utils;
pub mod models;
pub mod simd;
pub mod forces;
pub mod integration;
pub mod initialization;
pub mod simulation;

/// ### General helper function
/// - Asserts that two single precision numbers are approximately equal.
///
/// ### Arguments
///
/// * `a` - The first floating point number.
/// * `b` - The second floating point number.
/// * `epsilon` - The maximum difference between `a` and `b` for them to be considered equal.
/// * `optional_message` - An optional message to display if the assertion fails.
///
pub fn assert_float_eq(a: f32, b: f32, epsilon: f32, optional_message: Option<&str>) {
    match optional_message {
        Some(message) => assert!((a - b).abs() < epsilon, "a: {:?},\nb: {:?},\nepsilon: {:?},\n message: {:?}", a, b, epsilon, message),
        None => assert!((a - b).abs() < epsilon, "Expected {} to be approximately equal to {} (epsilon: {})", a, b, epsilon),
    }
}
