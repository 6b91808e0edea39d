//! Semi-implicit (symplectic) Euler.
//!
//! Velocities are updated from the reduced accelerations first, and positions are then
//! advanced with the new velocities. Bodies are independent, so the update runs in
//! parallel over indices on the current rayon pool.
use rayon::prelude::*;

use crate::models::BodyStore;

/// Smallest number of bodies handed to one rayon task.
const MIN_BODIES_PER_TASK: usize = 1024;

/// Applies the reduced accelerations in row 0 of the store's accumulators.
///
/// Must run after [`crate::forces::reduce_accelerations`].
///
/// # Examples
///
/// ```
/// use rs_nbody::integration::integrate;
/// use rs_nbody::models::BodyStore;
/// use rs_nbody::simd::PolicyKind;
///
/// let mut store = BodyStore::from_parts(
///     &[0.0], &[0.0], &[1.0], &[0.0], &[1.0], 1, PolicyKind::Scalar,
/// ).unwrap();
/// integrate(&mut store, 0.5);
/// assert_eq!(store.pos_x()[0], 0.5);
/// ```
pub fn integrate(store: &mut BodyStore, dt: f32) {
    if store.is_empty() {
        return;
    }
    let (arrays, acc_x, acc_y) = store.integration_parts();
    integrate_slice(
        arrays.pos_x,
        arrays.pos_y,
        arrays.vel_x,
        arrays.vel_y,
        acc_x,
        acc_y,
        dt,
    );
}

/// Integrates one set of equally long slices.
///
/// # Panics
///
/// Panics if the slices differ in length.
pub fn integrate_slice(
    pos_x: &mut [f32],
    pos_y: &mut [f32],
    vel_x: &mut [f32],
    vel_y: &mut [f32],
    acc_x: &[f32],
    acc_y: &[f32],
    dt: f32,
) {
    let n = pos_x.len();
    assert!(
        [pos_y.len(), vel_x.len(), vel_y.len(), acc_x.len(), acc_y.len()]
            .iter()
            .all(|&len| len == n),
        "integrate_slice needs slices of equal length"
    );

    pos_x
        .par_iter_mut()
        .zip(pos_y.par_iter_mut())
        .zip(vel_x.par_iter_mut())
        .zip(vel_y.par_iter_mut())
        .zip(acc_x.par_iter().zip(acc_y.par_iter()))
        .with_min_len(MIN_BODIES_PER_TASK)
        .for_each(|((((px, py), vx), vy), (ax, ay))| {
            *vx += ax * dt;
            *vy += ay * dt;
            *px += *vx * dt;
            *py += *vy * dt;
        });
}
