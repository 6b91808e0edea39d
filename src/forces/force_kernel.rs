//! Pairwise softened gravity, written once over [`SimdPolicy`].
//!
//! Each worker owns one row of the x and y accumulator matrices. For every body `i`
//! it is dealt, the worker streams through `j > i`, adds the pull of `j` to a running
//! total for `i` and subtracts the equal and opposite pull of `i` from column `j` of
//! its own row. Rows are only combined afterwards, by [`crate::forces::reduce_accelerations`].
//!
//! The gravitational constant is 1.

use rayon::prelude::*;

use crate::models::{BodyStore, BodyView};
use crate::simd::{reciprocal_sqrt, PolicyKind, Scalar, SimdPolicy};
use crate::utils::{round_up_to_multiple, SOFTENING_EPSILON};

#[cfg(target_arch = "x86_64")]
use crate::simd::Narrow;
#[cfg(all(target_arch = "x86_64", feature = "avx512-simd"))]
use crate::simd::Wide;

/// Fills the store's accumulator matrices with every worker's partial accelerations.
///
/// Every row is zeroed first. Runs on the current rayon pool, one task per row. A store
/// without bodies is left untouched.
///
/// # Panics
///
/// Panics if the host does not support `policy`, or if the store was laid out for a
/// narrower policy than `policy`.
///
/// # Examples
///
/// ```
/// use rs_nbody::forces::{compute_accelerations, reduce_accelerations};
/// use rs_nbody::models::BodyStore;
/// use rs_nbody::simd::PolicyKind;
///
/// let mut store = BodyStore::from_parts(
///     &[-1.0, 1.0], &[0.0, 0.0], &[0.0, 0.0], &[0.0, 0.0], &[1.0, 1.0],
///     1, PolicyKind::Scalar,
/// ).unwrap();
/// compute_accelerations(PolicyKind::Scalar, &mut store);
/// reduce_accelerations(&mut store);
///
/// // Unit masses two apart attract with 1/4.
/// assert!((store.acc_x().get(0, 0) - 0.25).abs() < 1e-6);
/// assert!((store.acc_x().get(0, 1) + 0.25).abs() < 1e-6);
/// ```
pub fn compute_accelerations(policy: PolicyKind, store: &mut BodyStore) {
    if store.is_empty() {
        return;
    }
    assert!(policy.is_supported(), "SIMD policy {} is not supported by this host", policy);
    assert!(
        store.supports_policy(policy),
        "store laid out for {} cannot run the {} kernel",
        store.layout().name(),
        policy.name()
    );

    let workers = store.workers();
    let (view, acc_x, acc_y) = store.force_phase_parts();
    acc_x
        .par_rows_mut()
        .zip(acc_y.par_rows_mut())
        .enumerate()
        .for_each(|(worker, (row_x, row_y))| {
            row_x.fill(0.0);
            row_y.fill(0.0);
            accumulate_rows(policy, view, row_x, row_y, worker, workers);
        });
}

/// Runs one worker's share of the force phase with the kernel built for `policy`.
fn accumulate_rows(
    policy: PolicyKind,
    view: BodyView<'_>,
    row_x: &mut [f32],
    row_y: &mut [f32],
    worker: usize,
    workers: usize,
) {
    // SAFETY: `compute_accelerations` checked host support and the store layout.
    unsafe {
        match policy {
            PolicyKind::Scalar => accumulate_worker::<Scalar>(view, row_x, row_y, worker, workers),
            #[cfg(target_arch = "x86_64")]
            PolicyKind::Narrow => accumulate_worker_narrow(view, row_x, row_y, worker, workers),
            #[cfg(all(target_arch = "x86_64", feature = "avx512-simd"))]
            PolicyKind::Wide => accumulate_worker_wide(view, row_x, row_y, worker, workers),
            #[allow(unreachable_patterns)]
            _ => unreachable!("{} passed the support check but has no kernel", policy),
        }
    }
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
unsafe fn accumulate_worker_narrow(
    view: BodyView<'_>,
    row_x: &mut [f32],
    row_y: &mut [f32],
    worker: usize,
    workers: usize,
) {
    accumulate_worker::<Narrow>(view, row_x, row_y, worker, workers)
}

#[cfg(all(target_arch = "x86_64", feature = "avx512-simd"))]
#[target_feature(enable = "avx512f")]
unsafe fn accumulate_worker_wide(
    view: BodyView<'_>,
    row_x: &mut [f32],
    row_y: &mut [f32],
    worker: usize,
    workers: usize,
) {
    accumulate_worker::<Wide>(view, row_x, row_y, worker, workers)
}

/// Bodies are dealt cyclically (`i = worker, worker + workers, ...`) so that every
/// worker gets a similar share of the shrinking `j > i` loops.
#[inline(always)]
unsafe fn accumulate_worker<P: SimdPolicy>(
    view: BodyView<'_>,
    row_x: &mut [f32],
    row_y: &mut [f32],
    worker: usize,
    workers: usize,
) {
    for i in (worker..view.len()).step_by(workers.max(1)) {
        accumulate_body::<P>(view, row_x, row_y, i);
    }
}

/// Interactions of body `i` with every `j > i`.
///
/// `j` runs scalar until it reaches a lane-aligned index, then in full vectors with
/// aligned loads and stores, then scalar again for the remainder.
///
/// # Safety
///
/// The host must support `P`. The body arrays and both rows must be aligned to
/// `P::ALIGNMENT`, and the rows must be padded to a multiple of `P::WIDTH`.
#[inline(always)]
unsafe fn accumulate_body<P: SimdPolicy>(
    view: BodyView<'_>,
    row_x: &mut [f32],
    row_y: &mut [f32],
    i: usize,
) {
    let n = view.len();
    let (xi, yi, mi) = (view.pos_x[i], view.pos_y[i], view.mass[i]);
    let mut ax = 0.0_f32;
    let mut ay = 0.0_f32;

    let mut j = i + 1;
    let head_end = round_up_to_multiple(j, P::WIDTH).min(n);
    while j < head_end {
        let (fx, fy) = pair_scalar(view, row_x, row_y, xi, yi, mi, j);
        ax += fx;
        ay += fy;
        j += 1;
    }

    let epsilon = P::broadcast(SOFTENING_EPSILON);
    let pxi = P::broadcast(xi);
    let pyi = P::broadcast(yi);
    let pmi = P::broadcast(mi);
    let mut sum_x = P::zero();
    let mut sum_y = P::zero();

    while j + P::WIDTH <= n {
        let dx = P::sub(P::load(view.pos_x.as_ptr().add(j)), pxi);
        let dy = P::sub(P::load(view.pos_y.as_ptr().add(j)), pyi);
        let mj = P::load(view.mass.as_ptr().add(j));

        let d2 = P::add(epsilon, P::add(P::mul(dx, dx), P::mul(dy, dy)));
        let inv_r = P::reciprocal_sqrt(d2);
        let inv_r3 = P::mul(P::mul(inv_r, inv_r), inv_r);
        let ivx = P::mul(dx, inv_r3);
        let ivy = P::mul(dy, inv_r3);

        sum_x = P::add(sum_x, P::mul(ivx, mj));
        sum_y = P::add(sum_y, P::mul(ivy, mj));

        let out_x = row_x.as_mut_ptr().add(j);
        let out_y = row_y.as_mut_ptr().add(j);
        P::store(out_x, P::sub(P::load(out_x), P::mul(ivx, pmi)));
        P::store(out_y, P::sub(P::load(out_y), P::mul(ivy, pmi)));

        j += P::WIDTH;
    }
    ax += P::horizontal_sum(sum_x);
    ay += P::horizontal_sum(sum_y);

    while j < n {
        let (fx, fy) = pair_scalar(view, row_x, row_y, xi, yi, mi, j);
        ax += fx;
        ay += fy;
        j += 1;
    }

    // column i may already hold contributions from bodies this worker handled earlier
    row_x[i] += ax;
    row_y[i] += ay;
}

/// One pair, same formula as a single vector lane. Writes the reaction on `j` and
/// returns the pull on `i`.
#[inline(always)]
fn pair_scalar(
    view: BodyView<'_>,
    row_x: &mut [f32],
    row_y: &mut [f32],
    xi: f32,
    yi: f32,
    mi: f32,
    j: usize,
) -> (f32, f32) {
    let dx = view.pos_x[j] - xi;
    let dy = view.pos_y[j] - yi;
    let d2 = SOFTENING_EPSILON + (dx * dx + dy * dy);
    let inv_r = reciprocal_sqrt(d2);
    let inv_r3 = inv_r * inv_r * inv_r;
    let ivx = dx * inv_r3;
    let ivy = dy * inv_r3;

    row_x[j] -= ivx * mi;
    row_y[j] -= ivy * mi;
    (ivx * view.mass[j], ivy * view.mass[j])
}
