//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds the values the engine takes from its surroundings:
//! - fixed step size `dt` (one per algorithm),
//! - softening and gravitational constant (`eps2`, `G`),
//! - Barnes–Hut opening threshold and minimum cell size,
//! - worker thread count.
//!
//! The `DEFAULT_*` and range constants are shared by the config layer and
//! the runtime tunables.

/// Gravitational constant
pub const DEFAULT_G: f64 = 0.001;
/// Softening added to every squared separation
pub const DEFAULT_EPS2: f64 = 25.0;

pub const DEFAULT_BARNES_HUT_DT: f64 = 0.1;
pub const DEFAULT_PAIRWISE_DT: f64 = 2.0;

pub const DEFAULT_THETA: f64 = 0.5;
pub const THETA_MIN: f64 = 0.1;
pub const THETA_MAX: f64 = 2.0;
pub const THETA_STEP: f64 = 0.1;

pub const DEFAULT_MIN_CELL_SIZE: f64 = 10.0;
pub const MIN_CELL_SIZE_MIN: f64 = 1.0;
pub const MIN_CELL_SIZE_MAX: f64 = 100.0;
pub const MIN_CELL_SIZE_STEP: f64 = 10.0;

/// Padding added on every side of the body bounding box before the root cell is sized
pub const TREE_MARGIN: f64 = 100.0;

/// Hardware concurrency, never less than 1
pub fn default_num_threads() -> usize {
    num_cpus::get().max(1)
}

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct Parameters {
    pub dt: f64, // fixed step size
    pub eps2: f64, // softening
    pub G: f64, // gravitational constant
    pub theta: f64, // opening threshold (Barnes–Hut only)
    pub min_cell_size: f64, // subdivision floor (Barnes–Hut only)
    pub num_threads: usize, // workers per force evaluation
}

impl Parameters {
    /// Defaults for the hierarchical simulator
    pub fn barnes_hut() -> Self {
        Self {
            dt: DEFAULT_BARNES_HUT_DT,
            eps2: DEFAULT_EPS2,
            G: DEFAULT_G,
            theta: DEFAULT_THETA,
            min_cell_size: DEFAULT_MIN_CELL_SIZE,
            num_threads: default_num_threads(),
        }
    }

    /// Defaults for the pairwise simulator
    pub fn pairwise() -> Self {
        Self {
            dt: DEFAULT_PAIRWISE_DT,
            ..Self::barnes_hut()
        }
    }
}
