use approx::{assert_abs_diff_eq, assert_relative_eq};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::forces::{compute_accelerations, reduce_accelerations};
use crate::models::BodyStore;
use crate::simd::PolicyKind;
use crate::utils::SOFTENING_EPSILON;

fn random_store(n: usize, workers: usize, layout: PolicyKind, seed: u64) -> BodyStore {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut column = |lo: f32, hi: f32| (0..n).map(|_| rng.random_range(lo..hi)).collect::<Vec<_>>();
    let pos_x = column(-1.0, 1.0);
    let pos_y = column(-1.0, 1.0);
    let vel = vec![0.0; n];
    let mass = column(0.1, 1.0);
    BodyStore::from_parts(&pos_x, &pos_y, &vel, &vel, &mass, workers, layout).unwrap()
}

fn accelerations(policy: PolicyKind, store: &mut BodyStore) -> (Vec<f32>, Vec<f32>) {
    compute_accelerations(policy, store);
    reduce_accelerations(store);
    let n = store.body_count();
    (store.acc_x().row(0)[..n].to_vec(), store.acc_y().row(0)[..n].to_vec())
}

/// Direct O(n²) sum in f64, no symmetry tricks.
fn reference(store: &BodyStore) -> (Vec<f64>, Vec<f64>) {
    let n = store.body_count();
    let (px, py, m) = (store.pos_x(), store.pos_y(), store.masses());
    let mut ax = vec![0.0_f64; n];
    let mut ay = vec![0.0_f64; n];
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            let dx = (px[j] - px[i]) as f64;
            let dy = (py[j] - py[i]) as f64;
            let d2 = SOFTENING_EPSILON as f64 + dx * dx + dy * dy;
            let inv_r3 = 1.0 / (d2 * d2.sqrt());
            ax[i] += dx * inv_r3 * m[j] as f64;
            ay[i] += dy * inv_r3 * m[j] as f64;
        }
    }
    (ax, ay)
}

#[test]
fn test_two_bodies_attract_along_line() {
    let mut store = BodyStore::from_parts(
        &[-1.0, 1.0],
        &[0.0, 0.0],
        &[0.0, 0.0],
        &[0.0, 0.0],
        &[1.0, 1.0],
        1,
        PolicyKind::Scalar,
    )
    .unwrap();
    let (ax, ay) = accelerations(PolicyKind::Scalar, &mut store);

    assert_abs_diff_eq!(ax[0], 0.25, epsilon = 1e-6);
    assert_abs_diff_eq!(ax[1], -0.25, epsilon = 1e-6);
    assert_eq!(ay, vec![0.0, 0.0]);
}

#[test]
fn test_matches_reference() {
    let mut store = random_store(40, 3, PolicyKind::Scalar, 11);
    let (ax, ay) = accelerations(PolicyKind::Scalar, &mut store);
    let (rx, ry) = reference(&store);

    for i in 0..store.body_count() {
        assert_relative_eq!(ax[i] as f64, rx[i], max_relative = 1e-4, epsilon = 1e-4);
        assert_relative_eq!(ay[i] as f64, ry[i], max_relative = 1e-4, epsilon = 1e-4);
    }
}

#[test]
fn test_newtons_third_law() {
    let mut store = random_store(33, 4, PolicyKind::detect(), 5);
    let (ax, ay) = accelerations(PolicyKind::detect(), &mut store);
    let m = store.masses();

    let mut momentum = (0.0_f64, 0.0_f64);
    let mut scale = 0.0_f64;
    for i in 0..store.body_count() {
        let (fx, fy) = (m[i] as f64 * ax[i] as f64, m[i] as f64 * ay[i] as f64);
        momentum.0 += fx;
        momentum.1 += fy;
        scale += fx.abs() + fy.abs();
    }
    assert!(momentum.0.abs() <= scale * 1e-4, "net force x {} (scale {})", momentum.0, scale);
    assert!(momentum.1.abs() <= scale * 1e-4, "net force y {} (scale {})", momentum.1, scale);
}

#[test]
fn test_pair_reaction_is_equal_and_opposite() {
    let mut store = BodyStore::from_parts(
        &[0.3, -0.2],
        &[0.1, 0.4],
        &[0.0, 0.0],
        &[0.0, 0.0],
        &[2.0, 0.5],
        2,
        PolicyKind::Scalar,
    )
    .unwrap();
    let (ax, ay) = accelerations(PolicyKind::Scalar, &mut store);

    assert_relative_eq!(2.0 * ax[0], -0.5 * ax[1], max_relative = 1e-6);
    assert_relative_eq!(2.0 * ay[0], -0.5 * ay[1], max_relative = 1e-6);
}

#[test]
fn test_swapping_axes_swaps_accelerations() {
    for policy in PolicyKind::available() {
        let original = random_store(21, 2, policy, 3);
        let mut swapped = BodyStore::from_parts(
            original.pos_y(),
            original.pos_x(),
            original.vel_x(),
            original.vel_y(),
            original.masses(),
            2,
            policy,
        )
        .unwrap();
        let mut original = original;

        let (ax, ay) = accelerations(policy, &mut original);
        let (sx, sy) = accelerations(policy, &mut swapped);
        assert_eq!(ax, sy, "{} x/y asymmetry", policy);
        assert_eq!(ay, sx, "{} y/x asymmetry", policy);
    }
}

#[test]
fn test_policies_agree_on_remainder_path() {
    let mut scalar = random_store(17, 2, PolicyKind::Scalar, 17);
    let (sx, sy) = accelerations(PolicyKind::Scalar, &mut scalar);

    for policy in PolicyKind::available() {
        let mut store = random_store(17, 2, policy, 17);
        let (ax, ay) = accelerations(policy, &mut store);
        for i in 0..17 {
            assert_relative_eq!(ax[i], sx[i], max_relative = 1e-4, epsilon = 1e-4);
            assert_relative_eq!(ay[i], sy[i], max_relative = 1e-4, epsilon = 1e-4);
        }
    }
}

#[test]
fn test_worker_count_does_not_change_result() {
    let layout = PolicyKind::detect();
    let mut single = random_store(50, 1, layout, 23);
    let (bx, by) = accelerations(layout, &mut single);

    for workers in [2, 3, 8] {
        let mut store = random_store(50, workers, layout, 23);
        let (ax, ay) = accelerations(layout, &mut store);
        for i in 0..50 {
            assert_relative_eq!(ax[i], bx[i], max_relative = 1e-4, epsilon = 1e-4);
            assert_relative_eq!(ay[i], by[i], max_relative = 1e-4, epsilon = 1e-4);
        }
    }
}

#[test]
fn test_coincident_bodies_stay_finite() {
    let mut store = BodyStore::from_parts(
        &[0.5, 0.5, 0.5],
        &[0.5, 0.5, 0.5],
        &[0.0; 3],
        &[0.0; 3],
        &[1.0; 3],
        1,
        PolicyKind::Scalar,
    )
    .unwrap();
    let (ax, ay) = accelerations(PolicyKind::Scalar, &mut store);
    assert!(ax.iter().chain(ay.iter()).all(|a| *a == 0.0));
}

#[test]
fn test_rows_are_cleared_between_calls() {
    let mut store = random_store(9, 2, PolicyKind::Scalar, 1);
    let first = accelerations(PolicyKind::Scalar, &mut store);
    let second = accelerations(PolicyKind::Scalar, &mut store);
    assert_eq!(first, second);
}

#[test]
fn test_zero_bodies_is_noop() {
    let mut store = BodyStore::new(0, 4, PolicyKind::Scalar);
    compute_accelerations(PolicyKind::Wide, &mut store);
    reduce_accelerations(&mut store);
    assert!(store.acc_x().as_slice().is_empty());
}

#[test]
#[should_panic]
fn test_rejects_narrower_layout() {
    let mut store = random_store(4, 1, PolicyKind::Scalar, 2);
    compute_accelerations(PolicyKind::Wide, &mut store);
}
