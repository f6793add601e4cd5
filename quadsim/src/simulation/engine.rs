//! Simulators exposed to driver code
//!
//! [`Simulator`] is the contract a UI or benchmark drives: advance one step,
//! report the algorithm identity, and optionally overlay the tree. Two
//! implementations share the integrator and dispatcher and differ only in
//! the force evaluator and their default step size.

use log::info;

use crate::error::{Result, SimError};
use crate::simulation::barnes_hut::QuadTree;
use crate::simulation::dispatcher::ParallelDispatcher;
use crate::simulation::forces::{NewtonianGravity, NewtonianGravityBarnesHut};
use crate::simulation::integrator::verlet_integrator;
use crate::simulation::params::{
    Parameters, MIN_CELL_SIZE_MAX, MIN_CELL_SIZE_MIN, MIN_CELL_SIZE_STEP, THETA_MAX, THETA_MIN, THETA_STEP,
};
use crate::simulation::states::Body;
use crate::visualization::tree_overlay::{draw_tree, TreeOverlay};

pub trait Simulator: Send {
    /// Advance every body by one fixed step. An empty slice is a no-op.
    fn advance_one_step(&mut self, bodies: &mut [Body]);

    fn algorithm_name(&self) -> &'static str;

    fn complexity_descriptor(&self) -> &'static str;

    /// Fixed step size used by `advance_one_step`
    fn time_step(&self) -> f64;

    fn num_threads(&self) -> usize;

    fn toggle_visualization(&mut self) {}

    /// Overlay internal structure after a step. `scale` maps world to screen units.
    fn draw(&self, _overlay: &mut dyn TreeOverlay, _scale: f64) {}

    /// Access to the Barnes–Hut tunables, if this is that simulator
    fn as_barnes_hut_mut(&mut self) -> Option<&mut BarnesHutSimulator> {
        None
    }
}

fn check_common(params: &Parameters) -> Result<()> {
    if !(params.dt.is_finite() && params.dt > 0.0) {
        return Err(SimError::InvalidParameter(format!("dt must be positive, got {}", params.dt)));
    }
    if !(params.eps2.is_finite() && params.eps2 > 0.0) {
        return Err(SimError::InvalidParameter(format!("eps2 must be positive, got {}", params.eps2)));
    }
    if !params.G.is_finite() {
        return Err(SimError::InvalidParameter(format!("G must be finite, got {}", params.G)));
    }
    Ok(())
}

// =========================================================================================
// Pairwise
// =========================================================================================

/// Exact O(N^2) simulator
pub struct PairwiseSimulator {
    parameters: Parameters,
    forces: NewtonianGravity,
    dispatcher: ParallelDispatcher,
}

impl PairwiseSimulator {
    pub fn new(parameters: Parameters) -> Result<Self> {
        check_common(&parameters)?;
        let dispatcher = ParallelDispatcher::new(parameters.num_threads)?;
        let forces = NewtonianGravity {
            G: parameters.G,
            eps2: parameters.eps2,
        };
        info!(
            "pairwise simulator: dt = {}, G = {}, eps2 = {}, {} threads",
            parameters.dt, parameters.G, parameters.eps2, parameters.num_threads
        );
        Ok(Self {
            parameters,
            forces,
            dispatcher,
        })
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }
}

impl Simulator for PairwiseSimulator {
    fn advance_one_step(&mut self, bodies: &mut [Body]) {
        verlet_integrator(bodies, &mut self.forces, &self.dispatcher, self.parameters.dt);
    }

    fn algorithm_name(&self) -> &'static str {
        "Brute Force"
    }

    fn complexity_descriptor(&self) -> &'static str {
        "O(N^2)"
    }

    fn time_step(&self) -> f64 {
        self.parameters.dt
    }

    fn num_threads(&self) -> usize {
        self.dispatcher.num_threads()
    }
}

// =========================================================================================
// Barnes–Hut
// =========================================================================================

/// Approximate O(N log N) simulator with runtime-tunable `theta` and
/// minimum cell size
pub struct BarnesHutSimulator {
    parameters: Parameters,
    forces: NewtonianGravityBarnesHut,
    dispatcher: ParallelDispatcher,
    show_tree: bool,
}

impl BarnesHutSimulator {
    pub fn new(parameters: Parameters) -> Result<Self> {
        check_common(&parameters)?;
        if !(THETA_MIN..=THETA_MAX).contains(&parameters.theta) {
            return Err(SimError::InvalidParameter(format!(
                "theta must lie in [{THETA_MIN}, {THETA_MAX}], got {}",
                parameters.theta
            )));
        }
        if !(MIN_CELL_SIZE_MIN..=MIN_CELL_SIZE_MAX).contains(&parameters.min_cell_size) {
            return Err(SimError::InvalidParameter(format!(
                "min_cell_size must lie in [{MIN_CELL_SIZE_MIN}, {MIN_CELL_SIZE_MAX}], got {}",
                parameters.min_cell_size
            )));
        }

        let dispatcher = ParallelDispatcher::new(parameters.num_threads)?;
        let forces = NewtonianGravityBarnesHut::new(
            parameters.G,
            parameters.eps2,
            parameters.theta,
            parameters.min_cell_size,
        );
        info!(
            "barnes-hut simulator: dt = {}, theta = {}, min cell = {}, {} threads",
            parameters.dt, parameters.theta, parameters.min_cell_size, parameters.num_threads
        );
        Ok(Self {
            parameters,
            forces,
            dispatcher,
            show_tree: false,
        })
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn theta(&self) -> f64 {
        self.parameters.theta
    }

    pub fn increase_theta(&mut self) {
        self.set_theta((self.parameters.theta + THETA_STEP).min(THETA_MAX));
    }

    pub fn decrease_theta(&mut self) {
        self.set_theta((self.parameters.theta - THETA_STEP).max(THETA_MIN));
    }

    fn set_theta(&mut self, theta: f64) {
        self.parameters.theta = theta;
        self.forces.theta = theta;
    }

    pub fn min_cell_size(&self) -> f64 {
        self.parameters.min_cell_size
    }

    pub fn increase_min_cell_size(&mut self) {
        self.set_min_cell_size((self.parameters.min_cell_size + MIN_CELL_SIZE_STEP).min(MIN_CELL_SIZE_MAX));
    }

    pub fn decrease_min_cell_size(&mut self) {
        self.set_min_cell_size((self.parameters.min_cell_size - MIN_CELL_SIZE_STEP).max(MIN_CELL_SIZE_MIN));
    }

    fn set_min_cell_size(&mut self, size: f64) {
        self.parameters.min_cell_size = size;
        self.forces.min_cell_size = size;
    }

    pub fn is_visualization_enabled(&self) -> bool {
        self.show_tree
    }

    /// Tree built by the last force evaluation, if a step has run
    pub fn tree(&self) -> Option<&QuadTree> {
        self.forces.tree()
    }
}

impl Simulator for BarnesHutSimulator {
    fn advance_one_step(&mut self, bodies: &mut [Body]) {
        verlet_integrator(bodies, &mut self.forces, &self.dispatcher, self.parameters.dt);
    }

    fn algorithm_name(&self) -> &'static str {
        "Barnes-Hut"
    }

    fn complexity_descriptor(&self) -> &'static str {
        "O(N log N)"
    }

    fn time_step(&self) -> f64 {
        self.parameters.dt
    }

    fn num_threads(&self) -> usize {
        self.dispatcher.num_threads()
    }

    fn toggle_visualization(&mut self) {
        self.show_tree = !self.show_tree;
    }

    fn draw(&self, overlay: &mut dyn TreeOverlay, scale: f64) {
        if !self.show_tree {
            return;
        }
        if let Some(tree) = self.forces.tree() {
            draw_tree(tree, scale, overlay);
        }
    }

    fn as_barnes_hut_mut(&mut self) -> Option<&mut BarnesHutSimulator> {
        Some(self)
    }
}
