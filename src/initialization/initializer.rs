//! Deterministic starting distributions.
//!
//! Both modes draw from a [`ChaCha8Rng`] seeded with a fixed value and fill the store
//! in index order on the calling thread, so a given seed and body count always produce
//! the same bits.
use std::f32::consts::TAU;

use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

use crate::models::BodyStore;
use crate::utils::{
    InitMode, CLUSTER_POSITION_SIGMA, CLUSTER_SPEED_SIGMA, MASS_FLOOR, MASS_MEAN, MASS_SCALE,
    MASS_SIGMA, SPIRAL_AXIS_RATIO, SPIRAL_INNER_RADIUS, SPIRAL_POSITION_NOISE, SPIRAL_RINGS,
    SPIRAL_RING_SPACING, SPIRAL_RING_TWIST, SPIRAL_SEGMENTS,
};

/// Overwrites positions, velocities and masses of every body in `store`.
///
/// # Examples
///
/// ```
/// use rs_nbody::initialization::initialize;
/// use rs_nbody::models::BodyStore;
/// use rs_nbody::simd::PolicyKind;
/// use rs_nbody::utils::{InitMode, DEFAULT_SEED};
///
/// let mut a = BodyStore::new(64, 1, PolicyKind::Scalar);
/// let mut b = BodyStore::new(64, 1, PolicyKind::Scalar);
/// initialize(&mut a, InitMode::Spiral, DEFAULT_SEED);
/// initialize(&mut b, InitMode::Spiral, DEFAULT_SEED);
/// assert_eq!(a, b);
/// ```
pub fn initialize(store: &mut BodyStore, mode: InitMode, seed: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    match mode {
        InitMode::Cluster => init_cluster(store, &mut rng),
        InitMode::Spiral => init_spiral(store, &mut rng),
    }
    debug!(
        "Initialized {} bodies ({:?}, seed {})",
        store.body_count(),
        mode,
        seed
    );
}

/// Gaussian blob around the origin.
///
/// Per body, in draw order: `x` and `y` from `N(0, 0.5)`, a heading uniform over a full
/// turn, a speed from `N(0, 0.5)`, then a mass from [`sample_mass`]. A negative speed
/// simply flips the heading.
pub fn init_cluster<R: Rng>(store: &mut BodyStore, rng: &mut R) {
    let arrays = store.arrays_mut();
    for i in 0..arrays.pos_x.len() {
        arrays.pos_x[i] = CLUSTER_POSITION_SIGMA * rng.sample::<f32, _>(StandardNormal);
        arrays.pos_y[i] = CLUSTER_POSITION_SIGMA * rng.sample::<f32, _>(StandardNormal);

        let heading = rng.random::<f32>() * TAU;
        let speed = CLUSTER_SPEED_SIGMA * rng.sample::<f32, _>(StandardNormal);
        let (sin, cos) = heading.sin_cos();
        arrays.vel_x[i] = cos * speed;
        arrays.vel_y[i] = sin * speed;

        arrays.mass[i] = sample_mass(rng);
    }
}

/// Concentric rotated ellipses with the default [`SpiralLayout`].
pub fn init_spiral<R: Rng>(store: &mut BodyStore, rng: &mut R) {
    SpiralLayout::default().populate(store, rng);
}

/// `MASS_FLOOR + |N(MASS_MEAN, MASS_SIGMA)| * MASS_SCALE`, always strictly positive.
pub fn sample_mass<R: Rng>(rng: &mut R) -> f32 {
    let draw = MASS_MEAN + MASS_SIGMA * rng.sample::<f32, _>(StandardNormal);
    MASS_FLOOR + draw.abs() * MASS_SCALE
}

/// Geometry of the spiral distribution.
///
/// Ring `r` is an ellipse with semi-axes `a = inner_radius + r * ring_spacing` and
/// `b = a * axis_ratio`, rotated by `r * ring_twist` radians. Each ring is cut into
/// `segments` angular cells and the bodies are shared as evenly as possible across all
/// `rings * segments` cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralLayout {
    pub rings: usize,
    pub segments: usize,
    pub inner_radius: f32,
    pub ring_spacing: f32,
    pub axis_ratio: f32,
    pub ring_twist: f32,
    pub position_noise: f32,
}

impl Default for SpiralLayout {
    fn default() -> Self {
        Self {
            rings: SPIRAL_RINGS,
            segments: SPIRAL_SEGMENTS,
            inner_radius: SPIRAL_INNER_RADIUS,
            ring_spacing: SPIRAL_RING_SPACING,
            axis_ratio: SPIRAL_AXIS_RATIO,
            ring_twist: SPIRAL_RING_TWIST,
            position_noise: SPIRAL_POSITION_NOISE,
        }
    }
}

impl SpiralLayout {
    /// Number of bodies placed in `cell` out of `cells` when distributing `bodies`.
    ///
    /// ```
    /// use rs_nbody::initialization::SpiralLayout;
    ///
    /// let total: usize = (0..7).map(|c| SpiralLayout::cell_share(c, 7, 100)).sum();
    /// assert_eq!(total, 100);
    /// assert_eq!(SpiralLayout::cell_share(0, 4, 2), 0);
    /// assert_eq!(SpiralLayout::cell_share(1, 4, 2), 1);
    /// ```
    pub fn cell_share(cell: usize, cells: usize, bodies: usize) -> usize {
        let (cell, cells, bodies) = (cell as u64, cells.max(1) as u64, bodies as u64);
        ((cell + 1) * bodies / cells - cell * bodies / cells) as usize
    }

    /// Places every body of `store`. Velocities are the unit tangent of the local
    /// ellipse, pointing counter-clockwise, and are not scaled by radius or mass.
    pub fn populate<R: Rng>(&self, store: &mut BodyStore, rng: &mut R) {
        let rings = self.rings.max(1);
        let segments = self.segments.max(1);
        let cells = rings * segments;
        let arrays = store.arrays_mut();
        let n = arrays.pos_x.len();

        let mut i = 0;
        for cell in 0..cells {
            let count = Self::cell_share(cell, cells, n);
            if count == 0 {
                continue;
            }
            let ring = cell / segments;
            let segment = cell % segments;

            let a = self.inner_radius + self.ring_spacing * ring as f32;
            let b = a * self.axis_ratio;
            let (sin_phi, cos_phi) = (self.ring_twist * ring as f32).sin_cos();

            for k in 0..count {
                let theta = (segment as f32 + k as f32 / count as f32) / segments as f32 * TAU;
                let (sin, cos) = theta.sin_cos();

                let (ex, ey) = (a * cos, b * sin);
                let noise_x = self.position_noise * rng.sample::<f32, _>(StandardNormal);
                let noise_y = self.position_noise * rng.sample::<f32, _>(StandardNormal);
                arrays.pos_x[i] = ex * cos_phi - ey * sin_phi + noise_x;
                arrays.pos_y[i] = ex * sin_phi + ey * cos_phi + noise_y;

                let (tx, ty) = (-a * sin, b * cos);
                let (tx, ty) = (tx * cos_phi - ty * sin_phi, tx * sin_phi + ty * cos_phi);
                let length = (tx * tx + ty * ty).sqrt();
                if length > 0.0 {
                    arrays.vel_x[i] = tx / length;
                    arrays.vel_y[i] = ty / length;
                } else {
                    arrays.vel_x[i] = 0.0;
                    arrays.vel_y[i] = 0.0;
                }

                arrays.mass[i] = sample_mass(rng);
                i += 1;
            }
        }
    }
}
