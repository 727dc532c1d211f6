//! Fixed-step explicit Euler integrator
//!
//! One tick is one unit of time. The kick is synchronous: accelerations for
//! every body are computed into a buffer before any velocity changes, then
//! positions drift with the new velocities

use super::forces::AccelSet;
use super::geometry::Space;
use super::params::Parameters;
use super::states::{Body, NVec2};

/// Kick: v += a, with all accelerations taken from the same state.
pub fn apply_gravity(bodies: &mut [Body], forces: &AccelSet, params: &Parameters) {
    let n = bodies.len();
    if n == 0 {
        return;
    }

    let mut accels = vec![NVec2::zeros(); n];
    forces.accumulate_accels(bodies, params, &mut accels);

    for (b, a) in bodies.iter_mut().zip(accels.iter()) {
        b.v += *a;
    }
}

/// Drift: x += v, wrapped into the canonical range on a torus.
pub fn integrate_positions(bodies: &mut [Body], space: &Space) {
    for b in bodies.iter_mut() {
        b.x = space.wrap(b.x + b.v);
    }
}

/// Advance the bodies by one Euler step (kick, then drift)
pub fn euler_integrator(bodies: &mut [Body], forces: &AccelSet, params: &Parameters) {
    apply_gravity(bodies, forces, params);
    integrate_positions(bodies, &params.space);
}
