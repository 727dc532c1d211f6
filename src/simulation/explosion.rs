//! Explosion fragmentation
//!
//! A body heavier than `max_mass` is replaced by N fragments. The circle
//! around it is cut into N random sectors; each fragment gets a share of the
//! mass proportional to its sector angle and flies out along the sector
//! bisector.
//!
//! Fragment speed follows one explicit [`FragmentSpeedModel`]:
//! - `Energy`: a fixed explosion energy `converted_mass · max_mass` is split
//!   equally, so lighter fragments fly faster (`v = sqrt(2E/N / m_k)`)
//! - `Momentum`: the parent's momentum magnitude is split equally
//!   (`v = |p|/N / m_k`)
//!
//! With `inherit_velocity` the parent's velocity is added on top.

use std::f64::consts::TAU;

use rand::Rng;
use tracing::warn;

use crate::error::Error;
use super::geometry::Space;
use super::params::{ExplosionParams, FragmentSpeedModel};
use super::states::{Body, NVec2};

/// Sector weights are drawn from [WEIGHT_FLOOR, 1 - WEIGHT_FLOOR) so no
/// sector collapses to zero width.
pub const WEIGHT_FLOOR: f64 = 0.01;

/// Fragment placement offset, in parent radii, on top of the fragment speed.
pub const OFFSET_RADII: f64 = 3.0;

/// A fragment before it gets an id and a radius.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentSpec {
    pub m: f64,
    pub x: NVec2,
    pub v: NVec2,
}

/// Cut the full circle into `n` random sector angles summing to 2π.
pub fn sector_partition<R: Rng>(n: usize, rng: &mut R) -> Vec<f64> {
    let weights: Vec<f64> = (0..n)
        .map(|_| WEIGHT_FLOOR + (1.0 - 2.0 * WEIGHT_FLOOR) * rng.random::<f64>())
        .collect();
    let total: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / total * TAU).collect()
}

/// Mass handed out to fragments: whatever is not turned into energy.
pub fn distributed_mass(parent_mass: f64, params: &ExplosionParams) -> f64 {
    parent_mass - params.converted_mass
}

/// Break `body` apart. Fragments that come out degenerate (non-positive or
/// non-finite mass or speed) are dropped with a warning rather than created.
pub fn fragment_body<R: Rng>(
    body: &Body,
    max_mass: f64,
    params: &ExplosionParams,
    space: &Space,
    rng: &mut R,
) -> Vec<FragmentSpec> {
    let n = rng.random_range(params.min_fragments..=params.max_fragments);
    let sectors = sector_partition(n, rng);
    let distributed = distributed_mass(body.m, params);

    // Per-fragment share of energy or momentum, both split evenly
    let share = match params.model {
        FragmentSpeedModel::Energy => params.converted_mass * max_mass / n as f64,
        FragmentSpeedModel::Momentum => body.momentum().norm() / n as f64,
    };
    let base_v = if params.inherit_velocity { body.v } else { NVec2::zeros() };

    let mut fragments = Vec::with_capacity(n);
    let mut angle = 0.0;
    for theta in sectors {
        let bisector = angle + theta / 2.0;
        angle += theta;

        let m = theta / TAU * distributed;
        let speed = match params.model {
            FragmentSpeedModel::Energy => (2.0 * share / m).sqrt(),
            FragmentSpeedModel::Momentum => share / m,
        };
        if !(m.is_finite() && m > 0.0 && speed.is_finite()) {
            let err = Error::DegenerateFragment(format!(
                "parent {} produced m = {m}, speed = {speed}",
                body.id
            ));
            warn!("{err}; skipping fragment");
            continue;
        }

        let dir = NVec2::new(bisector.cos(), bisector.sin());
        let offset = OFFSET_RADII * body.radius + speed;
        fragments.push(FragmentSpec {
            m,
            x: space.wrap(body.x + offset * dir),
            v: base_v + speed * dir,
        });
    }
    fragments
}
