//! Core state types for the 2D N-body simulation.
//!
//! Defines the `Body` record and the body-store helpers:
//! - `Body` using `NVec2` for position and velocity
//! - `Color` as a presentation-only tag carried along for renderers
//!
//! Bodies live in one contiguous `Vec<Body>` for a whole run. The engine
//! mutates them in place and never adds or removes any.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

/// RGBA color owned by the rendering side. The engine never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const CYAN: Color = Color::rgb(0, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub m: f64, // mass
    pub radius: f64, // display radius
    pub color: Color, // display color
}

impl Body {
    /// Body with a display radius derived from its mass, `max(1, 0.5 + 0.3 ln(m + 1))`
    pub fn new(x: NVec2, v: NVec2, m: f64) -> Self {
        Self {
            x,
            v,
            m,
            radius: display_radius(m),
            color: Color::WHITE,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

pub fn display_radius(m: f64) -> f64 {
    (0.5 + (m + 1.0).ln() * 0.3).max(1.0)
}

// diagnostics ==============================================================================

pub fn total_mass(bodies: &[Body]) -> f64 {
    bodies.iter().map(|b| b.m).sum()
}

/// Sum of `m * v` over all bodies
pub fn total_momentum(bodies: &[Body]) -> NVec2 {
    bodies.iter().fold(NVec2::zeros(), |p, b| p + b.m * b.v)
}

/// Mass-weighted mean position, or `None` for an empty or massless store
pub fn center_of_mass(bodies: &[Body]) -> Option<NVec2> {
    let m = total_mass(bodies);
    if m <= 0.0 {
        return None;
    }
    let weighted = bodies.iter().fold(NVec2::zeros(), |acc, b| acc + b.m * b.x);
    Some(weighted / m)
}

pub fn kinetic_energy(bodies: &[Body]) -> f64 {
    bodies.iter().map(|b| 0.5 * b.m * b.v.norm_squared()).sum()
}
