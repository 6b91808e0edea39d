//! Conserved quantities, accumulated in `f64`.
//!
//! Used to check a run rather than to drive it: momentum should stay at its initial
//! value to rounding error, and total energy should drift only slowly under the
//! symplectic integrator.
use rayon::prelude::*;

use crate::models::BodyStore;
use crate::utils::SOFTENING_EPSILON;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Diagnostics {
    pub momentum: (f64, f64),
    pub kinetic_energy: f64,
    pub potential_energy: f64,
    /// Origin for an empty store.
    pub center_of_mass: (f64, f64),
}

impl Diagnostics {
    pub fn measure(store: &BodyStore) -> Self {
        Self {
            momentum: total_momentum(store),
            kinetic_energy: kinetic_energy(store),
            potential_energy: potential_energy(store),
            center_of_mass: center_of_mass(store).unwrap_or((0.0, 0.0)),
        }
    }

    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy + self.potential_energy
    }
}

/// `sum(m * v)`.
pub fn total_momentum(store: &BodyStore) -> (f64, f64) {
    let m = store.masses();
    store
        .vel_x()
        .iter()
        .zip(store.vel_y())
        .zip(m)
        .fold((0.0, 0.0), |(px, py), ((&vx, &vy), &m)| {
            (px + m as f64 * vx as f64, py + m as f64 * vy as f64)
        })
}

/// `sum(m * |v|^2 / 2)`.
pub fn kinetic_energy(store: &BodyStore) -> f64 {
    store
        .vel_x()
        .iter()
        .zip(store.vel_y())
        .zip(store.masses())
        .map(|((&vx, &vy), &m)| {
            let (vx, vy) = (vx as f64, vy as f64);
            0.5 * m as f64 * (vx * vx + vy * vy)
        })
        .sum()
}

/// Softened pair potential `-sum(m_i * m_j / sqrt(eps + r^2))` over `i < j`.
pub fn potential_energy(store: &BodyStore) -> f64 {
    let (px, py, m) = (store.pos_x(), store.pos_y(), store.masses());
    (0..store.body_count())
        .into_par_iter()
        .map(|i| {
            let (xi, yi, mi) = (px[i] as f64, py[i] as f64, m[i] as f64);
            (i + 1..px.len())
                .map(|j| {
                    let dx = px[j] as f64 - xi;
                    let dy = py[j] as f64 - yi;
                    let d2 = SOFTENING_EPSILON as f64 + dx * dx + dy * dy;
                    -mi * m[j] as f64 / d2.sqrt()
                })
                .sum::<f64>()
        })
        .sum()
}

/// Mass-weighted mean position, `None` without bodies.
pub fn center_of_mass(store: &BodyStore) -> Option<(f64, f64)> {
    let total: f64 = store.masses().iter().map(|&m| m as f64).sum();
    if store.is_empty() || total <= 0.0 {
        return None;
    }
    let (sx, sy) = store
        .bodies()
        .fold((0.0, 0.0), |(sx, sy), body| {
            (sx + body.mass as f64 * body.x as f64, sy + body.mass as f64 * body.y as f64)
        });
    Some((sx / total, sy / total))
}
