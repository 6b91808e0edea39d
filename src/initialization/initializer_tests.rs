use approx::assert_abs_diff_eq;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::initialization::{initialize, sample_mass, SpiralLayout};
use crate::models::BodyStore;
use crate::simd::PolicyKind;
use crate::utils::{InitMode, DEFAULT_SEED, MASS_FLOOR};

fn initialized(n: usize, mode: InitMode, seed: u64) -> BodyStore {
    let mut store = BodyStore::new(n, 2, PolicyKind::Narrow);
    initialize(&mut store, mode, seed);
    store
}

#[test]
fn test_cluster_is_deterministic() {
    let a = initialized(1000, InitMode::Cluster, DEFAULT_SEED);
    let b = initialized(1000, InitMode::Cluster, DEFAULT_SEED);
    assert_eq!(a.pos_x(), b.pos_x());
    assert_eq!(a.pos_y(), b.pos_y());
    assert_eq!(a.vel_x(), b.vel_x());
    assert_eq!(a.vel_y(), b.vel_y());
    assert_eq!(a.masses(), b.masses());
}

#[test]
fn test_spiral_is_deterministic() {
    let a = initialized(3001, InitMode::Spiral, DEFAULT_SEED);
    let b = initialized(3001, InitMode::Spiral, DEFAULT_SEED);
    assert_eq!(a, b);
}

#[test]
fn test_seed_changes_distribution() {
    let a = initialized(16, InitMode::Cluster, 1);
    let b = initialized(16, InitMode::Cluster, 2);
    assert_ne!(a.pos_x(), b.pos_x());
}

#[test]
fn test_layout_does_not_change_values() {
    let mut scalar = BodyStore::new(100, 1, PolicyKind::Scalar);
    initialize(&mut scalar, InitMode::Cluster, DEFAULT_SEED);
    let narrow = initialized(100, InitMode::Cluster, DEFAULT_SEED);
    assert_eq!(scalar.snapshot(), narrow.snapshot());
}

#[test]
fn test_cluster_statistics() {
    let store = initialized(20_000, InitMode::Cluster, DEFAULT_SEED);
    let n = store.body_count() as f64;
    let mean = store.pos_x().iter().map(|&x| x as f64).sum::<f64>() / n;
    let variance = store.pos_x().iter().map(|&x| (x as f64 - mean).powi(2)).sum::<f64>() / n;

    assert_abs_diff_eq!(mean, 0.0, epsilon = 0.02);
    assert_abs_diff_eq!(variance.sqrt(), 0.5, epsilon = 0.02);
}

#[test]
fn test_masses_are_floored_and_finite() {
    for mode in [InitMode::Cluster, InitMode::Spiral] {
        let store = initialized(5000, mode, DEFAULT_SEED);
        for &m in store.masses() {
            assert!(m.is_finite() && m >= MASS_FLOOR, "{:?} produced mass {}", mode, m);
        }
    }

    let mut rng = ChaCha8Rng::seed_from_u64(0);
    assert!((0..1000).all(|_| sample_mass(&mut rng) > 0.0));
}

#[test]
fn test_spiral_velocities_are_unit_tangents() {
    let store = initialized(2500, InitMode::Spiral, DEFAULT_SEED);
    for (vx, vy) in store.vel_x().iter().zip(store.vel_y()) {
        assert_abs_diff_eq!((vx * vx + vy * vy).sqrt(), 1.0, epsilon = 1e-5);
    }
}

#[test]
fn test_spiral_places_every_body_within_outer_ring() {
    let layout = SpiralLayout::default();
    let outer = layout.inner_radius + layout.ring_spacing * (layout.rings - 1) as f32;
    // noise is N(0, 0.01); ten sigma covers every draw in practice
    let bound = outer + 10.0 * layout.position_noise;

    for n in [1, 7, 2500, 2501] {
        let store = initialized(n, InitMode::Spiral, DEFAULT_SEED);
        assert!(store.masses().iter().all(|&m| m > 0.0), "{} bodies left unplaced", n);
        for body in store.bodies() {
            assert!((body.x * body.x + body.y * body.y).sqrt() <= bound);
        }
    }
}

#[test]
fn test_degenerate_spiral_layout() {
    let layout = SpiralLayout {
        rings: 0,
        segments: 0,
        ..SpiralLayout::default()
    };
    let mut store = BodyStore::new(10, 1, PolicyKind::Scalar);
    let mut rng = ChaCha8Rng::seed_from_u64(DEFAULT_SEED);
    layout.populate(&mut store, &mut rng);
    assert!(store.masses().iter().all(|&m| m > 0.0));
}

#[test]
fn test_cell_shares_cover_all_bodies() {
    for (cells, bodies) in [(2500, 2), (2500, 2500), (2500, 9999), (3, 0)] {
        let total: usize = (0..cells).map(|c| SpiralLayout::cell_share(c, cells, bodies)).sum();
        assert_eq!(total, bodies);
    }
}

#[test]
fn test_empty_store() {
    let mut store = BodyStore::default();
    initialize(&mut store, InitMode::Spiral, DEFAULT_SEED);
    initialize(&mut store, InitMode::Cluster, DEFAULT_SEED);
    assert!(store.is_empty());
}
