//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – algorithm choice and Barnes–Hut options
//! - [`ParametersConfig`] – step size, physical constants, run length
//! - [`BodyConfig`]       – explicit initial state for individual bodies
//! - [`GalaxyConfig`]     – optional generated galaxy (or galaxy collision)
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   algorithm: "barnes_hut"   # or "pairwise"
//!   theta: 0.5                # Barnes–Hut only, [0.1, 2.0]
//!   min_cell_size: 10.0       # Barnes–Hut only, [1, 100]
//!   threads: 8                # omit for hardware concurrency
//!   show_tree: false
//!
//! parameters:
//!   dt: 0.1                   # omit for the algorithm default
//!   G: 0.001
//!   eps2: 25.0
//!   steps: 1000
//!   seed: 42
//!
//! galaxy:
//!   kind: "single"            # or "collision"
//!   stars: 5000
//!   radius: 500.0
//!   center: [400.0, 400.0]
//!
//! bodies:
//!   - x: [ 0.0, 0.0 ]
//!     v: [ 0.0, 0.0 ]
//!     m: 1000.0
//! ```
//!
//! Missing optional values fall back to the constants in
//! [`crate::simulation::params`].

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::simulation::params::{
    DEFAULT_EPS2, DEFAULT_G, DEFAULT_MIN_CELL_SIZE, DEFAULT_THETA,
};

/// Which force evaluator the simulator uses
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmConfig {
    #[serde(rename = "barnes_hut")] // quadtree approximation, O(N log N)
    BarnesHut,

    #[serde(rename = "pairwise")] // direct summation, O(N^2)
    Pairwise,
}

/// Engine configuration
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    pub algorithm: AlgorithmConfig,
    #[serde(default = "default_theta")]
    pub theta: f64, // opening threshold
    #[serde(default = "default_min_cell_size")]
    pub min_cell_size: f64, // subdivision floor
    #[serde(default)]
    pub threads: Option<usize>, // worker count, `None` - hardware concurrency
    #[serde(default)]
    pub show_tree: bool, // start with the tree overlay on
}

/// Numerical and physical parameters for a scenario
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    #[serde(default)]
    pub dt: Option<f64>, // time step, `None` - algorithm default
    #[serde(default = "default_g")]
    pub G: f64, // gravitational constant
    #[serde(default = "default_eps2")]
    pub eps2: f64, // softening
    #[serde(default = "default_steps")]
    pub steps: usize, // steps for a headless run
    #[serde(default)]
    pub seed: u64, // generator seed
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            dt: None,
            G: DEFAULT_G,
            eps2: DEFAULT_EPS2,
            steps: default_steps(),
            seed: 0,
        }
    }
}

/// Initial state of a single body
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: Vec<f64>, // position, two components
    #[serde(default)]
    pub v: Vec<f64>, // velocity, two components or empty for rest
    pub m: f64, // mass
    #[serde(default)]
    pub radius: Option<f64>, // display radius, derived from mass if absent
    #[serde(default)]
    pub color: Option<[u8; 3]>, // display color
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalaxyKind {
    #[serde(rename = "single")]
    Single,
    #[serde(rename = "collision")]
    Collision,
}

/// Generated initial conditions
#[derive(Deserialize, Debug, Clone)]
pub struct GalaxyConfig {
    pub kind: GalaxyKind,
    pub stars: usize, // stars besides the black hole(s)
    #[serde(default = "default_galaxy_radius")]
    pub radius: f64,
    #[serde(default = "default_center")]
    pub center: [f64; 2], // single galaxy center
    #[serde(default = "default_area")]
    pub area: [f64; 2], // width/height used to place colliding galaxies
    #[serde(default)]
    pub velocity: [f64; 2], // bulk velocity of a single galaxy
    #[serde(default = "default_black_hole_mass")]
    pub black_hole_mass: f64,
    #[serde(default = "default_orbit_factor")]
    pub orbit_factor: f64, // fraction of circular orbit speed
    #[serde(default = "default_collision_speed")]
    pub collision_speed: f64,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub galaxy: Option<GalaxyConfig>,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn default_theta() -> f64 {
    DEFAULT_THETA
}

fn default_min_cell_size() -> f64 {
    DEFAULT_MIN_CELL_SIZE
}

fn default_g() -> f64 {
    DEFAULT_G
}

fn default_eps2() -> f64 {
    DEFAULT_EPS2
}

fn default_steps() -> usize {
    1000
}

fn default_galaxy_radius() -> f64 {
    500.0
}

fn default_center() -> [f64; 2] {
    [400.0, 400.0]
}

fn default_area() -> [f64; 2] {
    [800.0, 800.0]
}

fn default_black_hole_mass() -> f64 {
    1_000_000.0
}

fn default_orbit_factor() -> f64 {
    0.99
}

fn default_collision_speed() -> f64 {
    1.5
}
