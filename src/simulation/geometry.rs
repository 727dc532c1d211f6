//! Geometry and topology helpers
//!
//! Radius law, wrap-aware deltas and coordinate wrapping. Everything that
//! measures distance in the simulation goes through [`Space`], so bounded
//! and toroidal worlds share the same force/merge/query code.

use std::f64::consts::PI;

use serde::Deserialize;

use super::states::NVec2;

/// Radius of a disc of mass `mass` at `density`: (m / (π·ρ))^(1/3)
pub fn calculate_radius(mass: f64, density: f64) -> f64 {
    (mass / (PI * density)).cbrt()
}

/// Signed, minimal-magnitude difference on a wrapping axis of length `dim`.
pub fn wrapped_delta(delta: f64, dim: f64) -> f64 {
    if delta.abs() > dim / 2.0 {
        delta - delta.signum() * dim
    } else {
        delta
    }
}

/// Map `x` into `[0, dim)`. Works for any overshoot, including several
/// multiples of `dim` in one step.
pub fn wrap_coord(x: f64, dim: f64) -> f64 {
    ((x % dim) + dim) % dim
}

/// How the edges of the plane behave.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Topology {
    /// Each axis wraps around; distances use wrapped deltas.
    #[default]
    #[serde(rename = "toroidal")]
    Toroidal,

    /// Plain Euclidean plane. Spawns must land inside the box but bodies
    /// may drift out of it afterwards.
    #[serde(rename = "bounded")]
    Bounded,
}

/// Extent and topology of the simulated plane.
///
/// `base_height` is the height the space was created with. Radii are
/// multiplied by `height / base_height`, so resizing the plane scales discs
/// together with the distances between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Space {
    pub width: f64,
    pub height: f64,
    pub topology: Topology,
    pub base_height: f64,
}

impl Space {
    pub fn new(width: f64, height: f64, topology: Topology) -> Self {
        Self { width, height, topology, base_height: height }
    }

    /// Length scale of the current extent relative to creation time.
    pub fn radius_scale(&self) -> f64 {
        self.height / self.base_height
    }

    /// Radius of a body of mass `m` at `density` in this space.
    pub fn radius_for(&self, m: f64, density: f64) -> f64 {
        calculate_radius(m, density) * self.radius_scale()
    }

    pub fn is_toroidal(&self) -> bool {
        self.topology == Topology::Toroidal
    }

    /// Displacement from `from` to `to`, shortest path on a torus.
    pub fn delta(&self, from: &NVec2, to: &NVec2) -> NVec2 {
        let d = to - from;
        match self.topology {
            Topology::Toroidal => NVec2::new(
                wrapped_delta(d.x, self.width),
                wrapped_delta(d.y, self.height),
            ),
            Topology::Bounded => d,
        }
    }

    pub fn distance(&self, a: &NVec2, b: &NVec2) -> f64 {
        self.delta(a, b).norm()
    }

    /// Canonical position: wrapped on a torus, untouched otherwise.
    pub fn wrap(&self, p: NVec2) -> NVec2 {
        match self.topology {
            Topology::Toroidal => NVec2::new(
                wrap_coord(p.x, self.width),
                wrap_coord(p.y, self.height),
            ),
            Topology::Bounded => p,
        }
    }

    /// `[0, width) × [0, height)`
    pub fn contains(&self, p: &NVec2) -> bool {
        (0.0..self.width).contains(&p.x) && (0.0..self.height).contains(&p.y)
    }
}
