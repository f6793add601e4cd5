//! Wall-clock benchmarks of the simulators
//!
//! `run` times one simulator, `compare` times two on identical copies of
//! the same bodies, and `bench_curve` prints a CSV of per-step cost against
//! body count for both algorithms.

use std::fmt;
use std::time::Instant;

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::configuration::config::{GalaxyConfig, GalaxyKind};
use crate::error::Result;
use crate::simulation::engine::{BarnesHutSimulator, PairwiseSimulator, Simulator};
use crate::simulation::galaxy::create_galaxy;
use crate::simulation::params::Parameters;
use crate::simulation::states::Body;

#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub algorithm_name: String,
    pub complexity: String,
    pub num_bodies: usize,
    pub num_threads: usize,
    pub num_steps: usize,
    pub total_ms: f64,
    pub avg_step_ms: f64,
    pub fps_equivalent: f64,
}

impl fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Algorithm:      {} ({})", self.algorithm_name, self.complexity)?;
        writeln!(f, "Bodies:         {}", self.num_bodies)?;
        writeln!(f, "Steps:          {}", self.num_steps)?;
        writeln!(f, "Threads:        {}", self.num_threads)?;
        writeln!(f, "Duration:       {:.1} ms", self.total_ms)?;
        writeln!(f, "Avg time/step:  {:.3} ms", self.avg_step_ms)?;
        write!(f, "FPS equivalent: {:.1}", self.fps_equivalent)
    }
}

/// Step `simulator` over `bodies` `steps` times and time it
pub fn run(simulator: &mut dyn Simulator, bodies: &mut [Body], steps: usize) -> BenchmarkResult {
    let t0 = Instant::now();
    for _ in 0..steps {
        simulator.advance_one_step(bodies);
    }
    let total_ms = t0.elapsed().as_secs_f64() * 1000.0;

    let avg_step_ms = if steps > 0 { total_ms / steps as f64 } else { 0.0 };
    let fps_equivalent = if avg_step_ms > 0.0 { 1000.0 / avg_step_ms } else { f64::INFINITY };

    let result = BenchmarkResult {
        algorithm_name: simulator.algorithm_name().to_string(),
        complexity: simulator.complexity_descriptor().to_string(),
        num_bodies: bodies.len(),
        num_threads: simulator.num_threads(),
        num_steps: steps,
        total_ms,
        avg_step_ms,
        fps_equivalent,
    };
    info!(
        "{}: {} bodies, {} steps, {:.3} ms/step",
        result.algorithm_name, result.num_bodies, steps, result.avg_step_ms
    );
    result
}

#[derive(Debug, Clone)]
pub struct Comparison {
    pub first: BenchmarkResult,
    pub second: BenchmarkResult,
}

impl Comparison {
    /// The faster of the two results
    pub fn winner(&self) -> &BenchmarkResult {
        if self.first.avg_step_ms <= self.second.avg_step_ms {
            &self.first
        } else {
            &self.second
        }
    }

    /// How many times faster the winner is
    pub fn speedup(&self) -> f64 {
        let (fast, slow) = if self.first.avg_step_ms <= self.second.avg_step_ms {
            (self.first.avg_step_ms, self.second.avg_step_ms)
        } else {
            (self.second.avg_step_ms, self.first.avg_step_ms)
        };
        if fast > 0.0 { slow / fast } else { f64::INFINITY }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "1. {}\n", self.first)?;
        writeln!(f, "2. {}\n", self.second)?;
        write!(f, "{} is {:.2}x faster", self.winner().algorithm_name, self.speedup())
    }
}

/// Run both simulators on separate copies of `bodies`
pub fn compare(a: &mut dyn Simulator, b: &mut dyn Simulator, bodies: &[Body], steps: usize) -> Comparison {
    let mut bodies_a = bodies.to_vec();
    let mut bodies_b = bodies.to_vec();
    Comparison {
        first: run(a, &mut bodies_a, steps),
        second: run(b, &mut bodies_b, steps),
    }
}

/// Seeded single galaxy of `n` bodies, black hole included
fn make_galaxy(n: usize, params: &Parameters) -> Vec<Body> {
    let cfg = GalaxyConfig {
        kind: GalaxyKind::Single,
        stars: n.saturating_sub(1),
        radius: 500.0,
        center: [400.0, 400.0],
        area: [800.0, 800.0],
        velocity: [0.0, 0.0],
        black_hole_mass: 1_000_000.0,
        orbit_factor: 0.99,
        collision_speed: 1.5,
    };
    let mut rng = StdRng::seed_from_u64(42);
    create_galaxy(&cfg, params.G, params.eps2, &mut rng)
}

/// Print `N,pairwise_ms,barnes_hut_ms` for each size in `sizes`
/// Paste output directly into a spreadsheet to graph
pub fn bench_curve(sizes: &[usize], steps: usize) -> Result<()> {
    let mut pairwise = PairwiseSimulator::new(Parameters::pairwise())?;
    let mut barnes_hut = BarnesHutSimulator::new(Parameters::barnes_hut())?;

    println!("N,pairwise_ms,barnes_hut_ms");
    for &n in sizes {
        let bodies = make_galaxy(n, pairwise.parameters());
        let cmp = compare(&mut pairwise, &mut barnes_hut, &bodies, steps);
        println!("{},{:.6},{:.6}", n, cmp.first.avg_step_ms, cmp.second.avg_step_ms);
    }
    Ok(())
}
