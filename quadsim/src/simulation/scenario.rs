//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle a
//! driver needs:
//! - the selected simulator (`Box<dyn Simulator>`)
//! - the body collection at t = 0 (generated galaxy first, then listed bodies)
//! - the number of steps requested for a headless run

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::configuration::config::{AlgorithmConfig, BodyConfig, GalaxyKind, ScenarioConfig};
use crate::error::{Result, SimError};
use crate::simulation::engine::{BarnesHutSimulator, PairwiseSimulator, Simulator};
use crate::simulation::galaxy::{create_galaxy, create_galaxy_collision};
use crate::simulation::params::{default_num_threads, Parameters};
use crate::simulation::states::{display_radius, Body, Color, NVec2};

pub struct Scenario {
    pub simulator: Box<dyn Simulator>,
    pub bodies: Vec<Body>,
    pub steps: usize,
    pub time: f64, // elapsed simulated time
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        let p_cfg = &cfg.parameters;
        let e_cfg = &cfg.engine;

        let mut parameters = match e_cfg.algorithm {
            AlgorithmConfig::BarnesHut => Parameters::barnes_hut(),
            AlgorithmConfig::Pairwise => Parameters::pairwise(),
        };
        if let Some(dt) = p_cfg.dt {
            parameters.dt = dt;
        }
        parameters.G = p_cfg.G;
        parameters.eps2 = p_cfg.eps2;
        parameters.theta = e_cfg.theta;
        parameters.min_cell_size = e_cfg.min_cell_size;
        parameters.num_threads = match e_cfg.threads {
            Some(0) => {
                warn!("threads: 0 requested, using hardware concurrency");
                default_num_threads()
            }
            Some(n) => n,
            None => default_num_threads(),
        };

        // Bodies: generated galaxy first so its black hole leads the collection
        let mut bodies = Vec::new();
        if let Some(g_cfg) = &cfg.galaxy {
            let mut rng = StdRng::seed_from_u64(p_cfg.seed);
            bodies = match g_cfg.kind {
                GalaxyKind::Single => create_galaxy(g_cfg, parameters.G, parameters.eps2, &mut rng),
                GalaxyKind::Collision => create_galaxy_collision(g_cfg, parameters.G, parameters.eps2, &mut rng),
            };
        }
        for (i, bc) in cfg.bodies.iter().enumerate() {
            bodies.push(body_from_config(i, bc)?);
        }

        let mut simulator: Box<dyn Simulator> = match e_cfg.algorithm {
            AlgorithmConfig::BarnesHut => Box::new(BarnesHutSimulator::new(parameters)?),
            AlgorithmConfig::Pairwise => Box::new(PairwiseSimulator::new(parameters)?),
        };
        if e_cfg.show_tree {
            simulator.toggle_visualization();
        }

        info!(
            "scenario: {} bodies, {} ({}), {} steps",
            bodies.len(),
            simulator.algorithm_name(),
            simulator.complexity_descriptor(),
            p_cfg.steps
        );

        Ok(Self {
            simulator,
            bodies,
            steps: p_cfg.steps,
            time: 0.0,
        })
    }

    /// Advance the bodies by `steps` fixed steps
    pub fn run(&mut self, steps: usize) {
        for _ in 0..steps {
            self.simulator.advance_one_step(&mut self.bodies);
            self.time += self.simulator.time_step();
        }
    }
}

/// Map a `BodyConfig` to a runtime `Body`, checking vector lengths
fn body_from_config(index: usize, bc: &BodyConfig) -> Result<Body> {
    let x = vec2(&bc.x).ok_or_else(|| SimError::InvalidBody {
        index,
        reason: format!("x needs 2 components, got {}", bc.x.len()),
    })?;
    let v = if bc.v.is_empty() {
        NVec2::zeros()
    } else {
        vec2(&bc.v).ok_or_else(|| SimError::InvalidBody {
            index,
            reason: format!("v needs 2 components, got {}", bc.v.len()),
        })?
    };
    if !(bc.m.is_finite() && bc.m >= 0.0) {
        return Err(SimError::InvalidBody {
            index,
            reason: format!("mass must be non-negative, got {}", bc.m),
        });
    }

    Ok(Body {
        x,
        v,
        m: bc.m,
        radius: bc.radius.unwrap_or_else(|| display_radius(bc.m)),
        color: bc.color.map(|[r, g, b]| Color::rgb(r, g, b)).unwrap_or_default(),
    })
}

fn vec2(c: &[f64]) -> Option<NVec2> {
    match c {
        [x, y] => Some(NVec2::new(*x, *y)),
        _ => None,
    }
}
