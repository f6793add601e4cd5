pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;
pub mod error;

pub use simulation::states::{Body, Color, NVec2};
pub use simulation::params::Parameters;
pub use simulation::forces::{ForceEvaluator, NewtonianGravity, NewtonianGravityBarnesHut};
pub use simulation::barnes_hut::{Cell, QuadTree};
pub use simulation::dispatcher::ParallelDispatcher;
pub use simulation::integrator::verlet_integrator;
pub use simulation::engine::{Simulator, BarnesHutSimulator, PairwiseSimulator};
pub use simulation::scenario::Scenario;

pub use configuration::config::{AlgorithmConfig, EngineConfig, ParametersConfig, BodyConfig, GalaxyConfig, GalaxyKind, ScenarioConfig};

pub use visualization::tree_overlay::{CellRect, TreeOverlay};

pub use benchmark::benchmark::{run as bench_run, compare as bench_compare, bench_curve, BenchmarkResult, Comparison};

pub use error::{Result, SimError};
