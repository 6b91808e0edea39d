//! Structure-of-arrays storage for every body in a simulation.
//!
//! Positions, velocities and masses live in five parallel, aligned `f32` arrays of
//! exactly `body_count` elements. Two [`AccumulatorMatrix`] values hold the per-worker
//! partial accelerations written during the force phase.
//!
//! # Example
//!
//! ```
//! use rs_nbody::models::BodyStore;
//! use rs_nbody::simd::PolicyKind;
//!
//! let store = BodyStore::from_parts(
//!     &[-1.0, 1.0],
//!     &[0.0, 0.0],
//!     &[0.0, 0.0],
//!     &[0.0, 0.0],
//!     &[1.0, 1.0],
//!     2,
//!     PolicyKind::Scalar,
//! ).expect("valid bodies");
//!
//! assert_eq!(store.body_count(), 2);
//! assert_eq!(store.workers(), 2);
//! assert_eq!(store.body(1).map(|b| b.x), Some(1.0));
//! ```
use crate::models::{AccumulatorMatrix, Body};
use crate::simd::PolicyKind;
use crate::utils::{AlignedBuffer, SimulationError};

/// Authoritative state of a simulation.
///
/// Body count, worker count and layout are fixed at construction. Cloning duplicates
/// every buffer; `std::mem::take` moves them out and leaves an empty store.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyStore {
    body_count: usize,
    layout: PolicyKind,
    pos_x: AlignedBuffer,
    pos_y: AlignedBuffer,
    vel_x: AlignedBuffer,
    vel_y: AlignedBuffer,
    mass: AlignedBuffer,
    acc_x: AccumulatorMatrix,
    acc_y: AccumulatorMatrix,
}

/// Shared borrow of the arrays the force kernel reads.
#[derive(Debug, Clone, Copy)]
pub struct BodyView<'a> {
    pub pos_x: &'a [f32],
    pub pos_y: &'a [f32],
    pub mass: &'a [f32],
}

impl BodyView<'_> {
    #[inline]
    pub fn len(&self) -> usize {
        self.pos_x.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos_x.is_empty()
    }
}

/// Exclusive borrow of every body array at once.
#[derive(Debug)]
pub struct BodyArraysMut<'a> {
    pub pos_x: &'a mut [f32],
    pub pos_y: &'a mut [f32],
    pub vel_x: &'a mut [f32],
    pub vel_y: &'a mut [f32],
    pub mass: &'a mut [f32],
}

impl BodyStore {
    /// Allocates a zeroed store for `body_count` bodies and `workers` accumulator rows,
    /// laid out for `layout`: every buffer is aligned to `layout.alignment()` and the
    /// accumulator rows are padded to `layout.width()`.
    ///
    /// A store laid out for a policy also works with any narrower one.
    ///
    /// # Panics
    ///
    /// Panics if `workers` is zero while `body_count` is not: such a store would have
    /// no row for the force phase to write into.
    pub fn new(body_count: usize, workers: usize, layout: PolicyKind) -> Self {
        assert!(
            body_count == 0 || workers > 0,
            "a store holding {} bodies needs at least one worker",
            body_count
        );
        let alignment = layout.alignment();
        let buffer = || AlignedBuffer::zeroed(body_count, alignment);
        Self {
            body_count,
            layout,
            pos_x: buffer(),
            pos_y: buffer(),
            vel_x: buffer(),
            vel_y: buffer(),
            mass: buffer(),
            acc_x: AccumulatorMatrix::new(workers, body_count, layout.width(), alignment),
            acc_y: AccumulatorMatrix::new(workers, body_count, layout.width(), alignment),
        }
    }

    /// Builds a store from explicit body data.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidBodyData`] if the slices differ in length, a
    /// value is not finite, or a mass is not strictly positive, and
    /// [`SimulationError::InvalidWorkerCount`] if there are bodies but no workers.
    pub fn from_parts(
        pos_x: &[f32],
        pos_y: &[f32],
        vel_x: &[f32],
        vel_y: &[f32],
        mass: &[f32],
        workers: usize,
        layout: PolicyKind,
    ) -> Result<Self, SimulationError> {
        let n = pos_x.len();
        if [pos_y.len(), vel_x.len(), vel_y.len(), mass.len()].iter().any(|&len| len != n) {
            return Err(SimulationError::InvalidBodyData(
                "body arrays must all have the same length".to_string(),
            ));
        }
        let all_finite = [pos_x, pos_y, vel_x, vel_y, mass]
            .iter()
            .all(|values| values.iter().all(|v| v.is_finite()));
        if !all_finite {
            return Err(SimulationError::InvalidBodyData(
                "body data must be finite".to_string(),
            ));
        }
        if let Some(i) = mass.iter().position(|&m| m <= 0.0) {
            return Err(SimulationError::InvalidBodyData(format!(
                "mass of body {} must be positive, got {}",
                i, mass[i]
            )));
        }

        if n > 0 && workers == 0 {
            return Err(SimulationError::InvalidWorkerCount(0));
        }

        let mut store = Self::new(n, workers, layout);
        store.pos_x.copy_from_slice(pos_x);
        store.pos_y.copy_from_slice(pos_y);
        store.vel_x.copy_from_slice(vel_x);
        store.vel_y.copy_from_slice(vel_y);
        store.mass.copy_from_slice(mass);
        Ok(store)
    }

    #[inline]
    pub fn body_count(&self) -> usize {
        self.body_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.body_count == 0
    }

    /// Number of accumulator rows, one per force-phase worker.
    #[inline]
    pub fn workers(&self) -> usize {
        self.acc_x.rows()
    }

    /// Policy whose width and alignment this store was laid out for.
    #[inline]
    pub fn layout(&self) -> PolicyKind {
        self.layout
    }

    #[inline]
    pub fn alignment(&self) -> usize {
        self.layout.alignment()
    }

    /// Body count rounded up to the layout's lane width.
    #[inline]
    pub fn padded_body_count(&self) -> usize {
        self.acc_x.cols()
    }

    /// Whether kernels built for `policy` can run on this store's layout.
    pub fn supports_policy(&self, policy: PolicyKind) -> bool {
        self.layout.width() % policy.width() == 0 && self.layout.alignment() >= policy.alignment()
    }

    pub fn pos_x(&self) -> &[f32] {
        &self.pos_x
    }

    pub fn pos_y(&self) -> &[f32] {
        &self.pos_y
    }

    pub fn vel_x(&self) -> &[f32] {
        &self.vel_x
    }

    pub fn vel_y(&self) -> &[f32] {
        &self.vel_y
    }

    pub fn masses(&self) -> &[f32] {
        &self.mass
    }

    pub fn acc_x(&self) -> &AccumulatorMatrix {
        &self.acc_x
    }

    pub fn acc_y(&self) -> &AccumulatorMatrix {
        &self.acc_y
    }

    /// Returns the body at `index`, if any.
    pub fn body(&self, index: usize) -> Option<Body> {
        if index >= self.body_count {
            return None;
        }
        Some(Body::new(self.pos_x[index], self.pos_y[index], self.mass[index]))
    }

    /// Iterates over every body in index order.
    pub fn bodies(&self) -> impl ExactSizeIterator<Item = Body> + '_ {
        self.pos_x
            .iter()
            .zip(self.pos_y.iter())
            .zip(self.mass.iter())
            .map(|((&x, &y), &mass)| Body::new(x, y, mass))
    }

    /// Copies every body into a new vector.
    pub fn snapshot(&self) -> Vec<Body> {
        self.bodies().collect()
    }

    pub fn view(&self) -> BodyView<'_> {
        BodyView {
            pos_x: &self.pos_x,
            pos_y: &self.pos_y,
            mass: &self.mass,
        }
    }

    pub fn arrays_mut(&mut self) -> BodyArraysMut<'_> {
        BodyArraysMut {
            pos_x: &mut self.pos_x,
            pos_y: &mut self.pos_y,
            vel_x: &mut self.vel_x,
            vel_y: &mut self.vel_y,
            mass: &mut self.mass,
        }
    }

    /// Splits the store for the force phase: body data is shared, accumulators are exclusive.
    pub fn force_phase_parts(
        &mut self,
    ) -> (BodyView<'_>, &mut AccumulatorMatrix, &mut AccumulatorMatrix) {
        (
            BodyView {
                pos_x: &self.pos_x,
                pos_y: &self.pos_y,
                mass: &self.mass,
            },
            &mut self.acc_x,
            &mut self.acc_y,
        )
    }

    /// Accumulator matrices only, for the reduction phase.
    pub fn accumulators_mut(&mut self) -> (&mut AccumulatorMatrix, &mut AccumulatorMatrix) {
        (&mut self.acc_x, &mut self.acc_y)
    }

    /// Splits the store for integration: body arrays are exclusive, and the reduced
    /// accelerations (row 0, trimmed to `body_count`) are shared.
    ///
    /// # Panics
    ///
    /// Panics if the store has no accumulator rows while holding bodies.
    pub fn integration_parts(&mut self) -> (BodyArraysMut<'_>, &[f32], &[f32]) {
        let n = self.body_count;
        let (acc_x, acc_y) = if n == 0 {
            (&[][..], &[][..])
        } else {
            (&self.acc_x.row(0)[..n], &self.acc_y.row(0)[..n])
        };
        (
            BodyArraysMut {
                pos_x: &mut self.pos_x,
                pos_y: &mut self.pos_y,
                vel_x: &mut self.vel_x,
                vel_y: &mut self.vel_y,
                mass: &mut self.mass,
            },
            acc_x,
            acc_y,
        )
    }
}

impl Default for BodyStore {
    fn default() -> Self {
        Self::new(0, 0, PolicyKind::Scalar)
    }
}
