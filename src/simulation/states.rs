//! Core state types for the N-body simulation.
//!
//! - `Body` is a massive disc in the plane, using `NVec2`
//! - `BodySnapshot` is the read-only view handed to renderers
//!
//! The body list itself is owned by [`SimulationWorld`](super::engine::SimulationWorld).

use nalgebra::Vector2;

use super::geometry::{calculate_radius, Space};

pub type NVec2 = Vector2<f64>;

/// Stable identifier, unique for the lifetime of a world.
pub type BodyId = u64;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub id: BodyId,
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub m: f64, // mass, always > 0
    pub radius: f64, // cached from (m, density, space scale)
}

impl Body {
    /// Build a body whose radius is derived from `m` and `density`.
    pub fn new(id: BodyId, m: f64, x: NVec2, v: NVec2, density: f64) -> Self {
        Self {
            id,
            x,
            v,
            m,
            radius: calculate_radius(m, density),
        }
    }

    /// Like `new`, with the radius scaled to the current extent of `space`.
    pub fn in_space(id: BodyId, m: f64, x: NVec2, v: NVec2, density: f64, space: &Space) -> Self {
        Self {
            radius: space.radius_for(m, density),
            ..Self::new(id, m, x, v, density)
        }
    }

    /// Linear momentum m·v
    pub fn momentum(&self) -> NVec2 {
        self.m * self.v
    }

    /// Recompute the cached radius after a density or extent change.
    pub fn refresh_radius(&mut self, density: f64, space: &Space) {
        self.radius = space.radius_for(self.m, density);
    }
}

/// What a renderer needs per body: position, radius and mass (for color).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySnapshot {
    pub id: BodyId,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub m: f64,
}

impl From<&Body> for BodySnapshot {
    fn from(b: &Body) -> Self {
        Self {
            id: b.id,
            x: b.x.x,
            y: b.x.y,
            radius: b.radius,
            m: b.m,
        }
    }
}
