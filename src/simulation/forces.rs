//! Force / acceleration contributors for the n-body engine
//!
//! Defines the acceleration trait and the direct, wrap-aware Newtonian
//! gravity term used by every tick

use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec2};

/// Collection of acceleration terms (gravity, drag, etc.)
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// The set every world starts with: plain Newtonian gravity
    pub fn gravity() -> Self {
        Self::new().with(NewtonianGravity)
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total accelerations for all `bodies`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_accels(&self, bodies: &[Body], params: &Parameters, out: &mut [NVec2]) {
        // Zero buffer
        for a in out.iter_mut() {
            *a = NVec2::zeros();
        }
        for term in &self.terms {
            term.acceleration(bodies, params, out);
        }
    }
}

/// Trait for acceleration sources operating on a body slice
/// Implementations add their contribution into `out[i]` for each body
pub trait Acceleration {
    fn acceleration(&self, bodies: &[Body], params: &Parameters, out: &mut [NVec2]);
}

/// Inverse-square gravity without softening.
/// Reads `G` and the space from the parameters passed in, so a parameter
/// change applies from the next tick on. Coincident bodies exert nothing on
/// each other.
pub struct NewtonianGravity;

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, bodies: &[Body], params: &Parameters, out: &mut [NVec2]) {
        let n = bodies.len();
        if n < 2 {
            return;
        }
        let g = params.g;
        let space = &params.space;

        // Loop over each unordered pair (i, j) with i < j.
        // The wrapped delta is antisymmetric, so one evaluation serves both
        // ordered pairs
        for i in 0..n {
            let bi = &bodies[i];

            for j in (i + 1)..n {
                let bj = &bodies[j];

                // r points from i to j (shortest way round on a torus)
                let r = space.delta(&bi.x, &bj.x);
                let dist = r.norm();
                if dist <= 0.0 {
                    continue;
                }

                // a_i += G m_j r / |r|^3, a_j -= G m_i r / |r|^3
                let coef = g / (dist * dist * dist);
                out[i] += coef * bj.m * r;
                out[j] -= coef * bi.m * r;
            }
        }
    }
}
