//! Initial-condition generators
//!
//! Produce the body collection a scenario starts from: a disc galaxy around a
//! central black hole, or two such galaxies on a collision course. The black
//! hole of each galaxy is pushed first, so a single galaxy has it at index 0.

use std::f64::consts::PI;

use rand::Rng;

use crate::configuration::config::GalaxyConfig;
use crate::simulation::states::{Body, Color, NVec2};

const STAR_COLORS: [Color; 4] = [
    Color::WHITE,
    Color::RED,
    Color::rgb(255, 230, 160),
    Color::rgb(200, 200, 255),
];

/// Layout of one disc galaxy
#[derive(Debug, Clone)]
pub struct DiscLayout {
    pub center: NVec2,
    pub velocity: NVec2,
    pub radius: f64,
    pub stars: usize,
    pub black_hole_mass: f64,
    pub orbit_factor: f64,
    pub black_hole_color: Color,
    pub star_color: Option<Color>, // `None` - random from the palette
}

/// Push a black hole and `disc.stars` orbiting stars onto `bodies`.
///
/// Stars are uniform over the disc, masses uniform in [0.5, 1.5). Each
/// moves at `orbit_factor` times the circular speed around the black hole,
/// `sqrt(G M / sqrt(r^2 + eps2))`, with 10% noise, plus the galaxy velocity.
#[allow(non_snake_case)]
pub fn push_disc<R: Rng>(bodies: &mut Vec<Body>, disc: &DiscLayout, G: f64, eps2: f64, rng: &mut R) {
    bodies.reserve(disc.stars + 1);
    bodies.push(Body::new(disc.center, disc.velocity, disc.black_hole_mass).with_color(disc.black_hole_color));

    for _ in 0..disc.stars {
        let r = disc.radius * rng.gen::<f64>().sqrt();
        let angle = 2.0 * PI * rng.gen::<f64>();
        let (sin, cos) = angle.sin_cos();

        let x = disc.center + NVec2::new(r * cos, r * sin);
        let m = rng.gen_range(0.5..1.5);

        let r_soft = (r * r + eps2).sqrt();
        let speed = (G * disc.black_hole_mass / r_soft).sqrt() * disc.orbit_factor;
        let noise = 1.0 + (rng.gen::<f64>() - 0.5) * 0.2;
        let v = NVec2::new(-speed * sin * noise, speed * cos * noise) + disc.velocity;

        let color = disc
            .star_color
            .unwrap_or_else(|| STAR_COLORS[rng.gen_range(0..STAR_COLORS.len())]);
        bodies.push(Body::new(x, v, m).with_color(color));
    }
}

/// One galaxy, black hole first
#[allow(non_snake_case)]
pub fn create_galaxy<R: Rng>(cfg: &GalaxyConfig, G: f64, eps2: f64, rng: &mut R) -> Vec<Body> {
    let disc = DiscLayout {
        center: NVec2::new(cfg.center[0], cfg.center[1]),
        velocity: NVec2::new(cfg.velocity[0], cfg.velocity[1]),
        radius: cfg.radius,
        stars: cfg.stars,
        black_hole_mass: cfg.black_hole_mass,
        orbit_factor: cfg.orbit_factor,
        black_hole_color: Color::WHITE,
        star_color: None,
    };
    let mut bodies = Vec::new();
    push_disc(&mut bodies, &disc, G, eps2, rng);
    bodies
}

/// Two galaxies of `stars / 2` each, separated by 0.4 of the area width
/// and approaching each other along x
#[allow(non_snake_case)]
pub fn create_galaxy_collision<R: Rng>(cfg: &GalaxyConfig, G: f64, eps2: f64, rng: &mut R) -> Vec<Body> {
    let [width, height] = cfg.area;
    let separation = width * 0.4;
    let per_galaxy = cfg.stars / 2;

    let left = DiscLayout {
        center: NVec2::new(width / 2.0 - separation / 2.0, height / 2.0),
        velocity: NVec2::new(cfg.collision_speed, 0.0),
        radius: cfg.radius,
        stars: per_galaxy,
        black_hole_mass: cfg.black_hole_mass,
        orbit_factor: cfg.orbit_factor,
        black_hole_color: Color::CYAN,
        star_color: Some(Color::rgb(100, 150, 255)),
    };
    let right = DiscLayout {
        center: NVec2::new(width / 2.0 + separation / 2.0, height / 2.0),
        velocity: NVec2::new(-cfg.collision_speed, 0.0),
        black_hole_color: Color::RED,
        star_color: Some(Color::rgb(255, 100, 100)),
        ..left.clone()
    };

    let mut bodies = Vec::with_capacity(2 * per_galaxy + 2);
    push_disc(&mut bodies, &left, G, eps2, rng);
    push_disc(&mut bodies, &right, G, eps2, rng);
    bodies
}
