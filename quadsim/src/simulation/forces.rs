//! Acceleration evaluators for the n-body engine
//!
//! Both evaluators fill a per-body acceleration buffer through the
//! [`ParallelDispatcher`]:
//! - [`NewtonianGravity`]: direct sum over every other body, O(N^2)
//! - [`NewtonianGravityBarnesHut`]: quadtree walk with opening threshold
//!   `theta`, O(N log N)
//!
//! Every pair interaction uses the softened separation `d^2 = |r|^2 + eps2`
//! and the fast inverse square root cubed for `1 / d^3`.

use log::debug;

use crate::simulation::barnes_hut::QuadTree;
use crate::simulation::dispatcher::ParallelDispatcher;
use crate::simulation::states::{Body, NVec2};

/// Bit-hack seed for `1 / sqrt(x)` refined by three Newton steps.
/// Expects `x > 0`.
#[inline]
pub fn fast_inv_sqrt(x: f64) -> f64 {
    let half = 0.5 * x;
    let mut y = f64::from_bits(0x5FE6_EB50_C7B5_37A9_u64.wrapping_sub(x.to_bits() >> 1));
    y *= 1.5 - half * y * y;
    y *= 1.5 - half * y * y;
    y *= 1.5 - half * y * y;
    y
}

/// `1 / d^3` for a softened squared distance `d2`
#[inline]
pub fn inv_distance_cubed(d2: f64) -> f64 {
    let inv_d = fast_inv_sqrt(d2);
    inv_d * inv_d * inv_d
}

/// Direct acceleration on body `i` from every other body
pub fn pairwise_acceleration(bodies: &[Body], i: usize, g: f64, eps2: f64) -> NVec2 {
    let xi = bodies[i].x;
    let mut acc = NVec2::zeros();

    for (j, bj) in bodies.iter().enumerate() {
        if j == i {
            continue;
        }
        // r points from i to j, so i is pulled along +r
        let r = bj.x - xi;
        let d2 = r.norm_squared() + eps2;
        acc += g * bj.m * inv_distance_cubed(d2) * r;
    }
    acc
}

/// A strategy that computes the acceleration of every body.
pub trait ForceEvaluator: Send {
    /// Overwrite `out[i]` with the acceleration on `bodies[i]`
    fn accumulate_accels(&mut self, bodies: &[Body], dispatcher: &ParallelDispatcher, out: &mut [NVec2]);
}

/// Softened Newtonian gravity summed over all pairs
#[allow(non_snake_case)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
    pub eps2: f64, // softening
}

impl ForceEvaluator for NewtonianGravity {
    fn accumulate_accels(&mut self, bodies: &[Body], dispatcher: &ParallelDispatcher, out: &mut [NVec2]) {
        let (g, eps2) = (self.G, self.eps2);
        dispatcher.evaluate(out, |i| pairwise_acceleration(bodies, i, g, eps2));
    }
}

/// Softened Newtonian gravity evaluated through a quadtree.
///
/// The tree is rebuilt on every call and kept until the next one so the
/// overlay can draw it.
#[allow(non_snake_case)]
pub struct NewtonianGravityBarnesHut {
    pub G: f64,
    pub eps2: f64,
    pub theta: f64,
    pub min_cell_size: f64,
    tree: Option<QuadTree>,
}

impl NewtonianGravityBarnesHut {
    #[allow(non_snake_case)]
    pub fn new(G: f64, eps2: f64, theta: f64, min_cell_size: f64) -> Self {
        Self {
            G,
            eps2,
            theta,
            min_cell_size,
            tree: None,
        }
    }

    /// Tree from the most recent evaluation
    pub fn tree(&self) -> Option<&QuadTree> {
        self.tree.as_ref()
    }
}

impl ForceEvaluator for NewtonianGravityBarnesHut {
    fn accumulate_accels(&mut self, bodies: &[Body], dispatcher: &ParallelDispatcher, out: &mut [NVec2]) {
        let tree = QuadTree::build(bodies, self.min_cell_size);
        debug!("quadtree: {} cells, depth {}", tree.cells.len(), tree.depth());

        let (g, eps2, theta) = (self.G, self.eps2, self.theta);
        dispatcher.evaluate(out, |i| tree.acceleration_on(i, bodies, g, eps2, theta));

        self.tree = Some(tree);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fast_inv_sqrt_is_close() {
        for x in [1e-3, 0.5, 1.0, 25.0, 10025.0, 1e8] {
            let exact = 1.0 / f64::sqrt(x);
            assert!(((fast_inv_sqrt(x) - exact) / exact).abs() < 1e-9, "x = {x}");
        }
    }

    #[test]
    fn coincident_bodies_stay_finite() {
        let bodies = vec![
            Body::new(NVec2::new(1.0, 1.0), NVec2::zeros(), 5.0),
            Body::new(NVec2::new(1.0, 1.0), NVec2::zeros(), 5.0),
        ];
        let a = pairwise_acceleration(&bodies, 0, 1.0, 25.0);
        assert!(a.x.is_finite() && a.y.is_finite());
        assert_eq!(a, NVec2::zeros());
    }
}
