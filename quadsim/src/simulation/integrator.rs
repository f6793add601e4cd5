//! Fixed-step time integrator for the N-body system
//!
//! Velocity–Verlet driven by any [`ForceEvaluator`]. The same routine serves
//! both the pairwise and the Barnes–Hut simulators.

use super::dispatcher::ParallelDispatcher;
use super::forces::ForceEvaluator;
use super::states::{Body, NVec2};

/// Advance `bodies` by one step of size `dt` using velocity–Verlet.
///
/// Two force evaluations per step:
/// - `x += v dt + a(t) dt^2 / 2`, `v_half = v + a(t) dt / 2`
/// - `v = v_half + a(t + dt) dt / 2`
///
/// Every body is updated, including any dominant central mass.
pub fn verlet_integrator(bodies: &mut [Body], forces: &mut dyn ForceEvaluator, dispatcher: &ParallelDispatcher, dt: f64) {
    let n = bodies.len();
    if n == 0 { // no bodies, return
        return;
    }

    let half_dt = 0.5 * dt;
    let half_dt2 = 0.5 * dt * dt;

    // a(t) at the current positions
    let mut acc = vec![NVec2::zeros(); n];
    forces.accumulate_accels(bodies, dispatcher, &mut acc);

    // Drift to x(t + dt) and keep v_half in b.v
    dispatcher.for_each_indexed(bodies, |i, b| {
        let a = acc[i];
        b.x += b.v * dt + a * half_dt2;
        b.v += a * half_dt;
    });

    // a(t + dt) at the new positions, reusing the buffer
    forces.accumulate_accels(bodies, dispatcher, &mut acc);

    // Finish: v(t + dt) = v_half + (dt/2) a(t + dt)
    dispatcher.for_each_indexed(bodies, |i, b| {
        b.v += acc[i] * half_dt;
    });
}
