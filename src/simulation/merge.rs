//! Collision merging
//!
//! Two bodies touch when their (wrapped) center distance is below the sum of
//! their radii. The pair is replaced by one body carrying the summed mass and
//! momentum. Merging is perfectly inelastic, kinetic energy is not kept.

use tracing::trace;

use super::geometry::Space;
use super::states::{Body, BodyId};

/// First colliding pair in ascending `(i, j)` order, `i < j`.
pub fn find_first_collision(bodies: &[Body], space: &Space) -> Option<(usize, usize)> {
    let n = bodies.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let (b1, b2) = (&bodies[i], &bodies[j]);
            if space.distance(&b1.x, &b2.x) < b1.radius + b2.radius {
                return Some((i, j));
            }
        }
    }
    None
}

/// Combine `b1` and `b2` into a body with id `id`.
///
/// The new center sits on the wrapped segment from `b1` towards `b2` at
/// the mass-weighted point, so pairs straddling a seam land on the right side.
pub fn merge_pair(b1: &Body, b2: &Body, id: BodyId, space: &Space, density: f64) -> Body {
    let m = b1.m + b2.m;
    let delta = space.delta(&b1.x, &b2.x);
    let x = space.wrap(b1.x + delta * (b2.m / m));
    let v = (b1.momentum() + b2.momentum()) / m;
    Body::in_space(id, m, x, v, density, space)
}

/// Merge until no pair touches. Each merge removes both partners and appends
/// the result at the end, then the scan restarts from the front, since the
/// new body may overlap a third one. Returns the number of merges.
pub fn resolve_merges(bodies: &mut Vec<Body>, space: &Space, density: f64, next_id: &mut BodyId) -> usize {
    let mut merges = 0;
    while let Some((i, j)) = find_first_collision(bodies, space) {
        // j > i, so removing j first keeps i valid
        let b2 = bodies.remove(j);
        let b1 = bodies.remove(i);
        let merged = merge_pair(&b1, &b2, *next_id, space, density);
        *next_id += 1;
        trace!(a = b1.id, b = b2.id, into = merged.id, m = merged.m, "merged bodies");
        bodies.push(merged);
        merges += 1;
    }
    merges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::geometry::Topology;
    use crate::simulation::states::NVec2;

    fn body(id: BodyId, m: f64, x: [f64; 2], v: [f64; 2]) -> Body {
        Body::new(id, m, NVec2::new(x[0], x[1]), NVec2::new(v[0], v[1]), 1.0)
    }

    #[test]
    fn merge_keeps_mass_and_momentum() {
        let space = Space::new(1000.0, 1000.0, Topology::Bounded);
        let a = body(0, 3.0, [10.0, 10.0], [1.0, -2.0]);
        let b = body(1, 5.0, [12.0, 10.0], [-0.5, 4.0]);
        let c = merge_pair(&a, &b, 2, &space, 1.0);
        assert_eq!(c.m, 8.0);
        let p_before = a.momentum() + b.momentum();
        assert!((c.momentum() - p_before).norm() < 1e-12);
        assert!((c.x - NVec2::new(10.0 + 2.0 * 5.0 / 8.0, 10.0)).norm() < 1e-12);
    }

    #[test]
    fn merge_across_the_seam_lands_near_the_edge() {
        let space = Space::new(100.0, 100.0, Topology::Toroidal);
        let a = body(0, 1.0, [99.0, 50.0], [0.0, 0.0]);
        let b = body(1, 1.0, [1.0, 50.0], [0.0, 0.0]);
        let c = merge_pair(&a, &b, 2, &space, 1.0);
        // midpoint on the short path is x = 0 (i.e. 100 wrapped)
        assert!(c.x.x < 1e-9 || (100.0 - c.x.x) < 1e-9, "x = {}", c.x.x);
        assert!((c.x.y - 50.0).abs() < 1e-12);
    }

    #[test]
    fn chained_merges_collapse_to_one_body() {
        let space = Space::new(1000.0, 1000.0, Topology::Toroidal);
        // three overlapping discs in a row
        let mut bodies = vec![
            body(0, 100.0, [100.0, 100.0], [0.0, 0.0]),
            body(1, 100.0, [104.0, 100.0], [0.0, 0.0]),
            body(2, 100.0, [108.0, 100.0], [0.0, 0.0]),
        ];
        let mut next_id = 3;
        let merges = resolve_merges(&mut bodies, &space, 1.0, &mut next_id);
        assert_eq!(merges, 2);
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0].m, 300.0);
        assert_eq!(next_id, 5);
    }

    #[test]
    fn first_pair_wins_in_index_order() {
        let space = Space::new(1000.0, 1000.0, Topology::Bounded);
        let bodies = vec![
            body(0, 1.0, [500.0, 500.0], [0.0, 0.0]),
            body(1, 1.0, [10.0, 10.0], [0.0, 0.0]),
            body(2, 1.0, [10.5, 10.0], [0.0, 0.0]),
            body(3, 1.0, [500.5, 500.0], [0.0, 0.0]),
        ];
        assert_eq!(find_first_collision(&bodies, &space), Some((0, 3)));
    }
}
