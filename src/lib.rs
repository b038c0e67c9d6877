//! Map Breaker - breakout played over a geographic map
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball, paddle, shapes, game loop)
//! - `ingest`: GeoJSON loading, projection and fitting to the arena
//! - `render`: Rendering surfaces fed from per-tick views
//! - `settings`: Arena and input configuration

pub mod error;
pub mod ingest;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::Error;
pub use settings::Settings;

use std::fmt::Write;

use glam::Vec2;

/// Game constants
pub mod consts {
    /// Nominal frame rate the step sizes are tuned for
    pub const TICK_HZ: u32 = 60;

    /// Arena defaults
    pub const ARENA_WIDTH: f32 = 700.0;
    pub const ARENA_HEIGHT: f32 = 700.0;
    pub const ARENA_MARGIN: f32 = 10.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.0;
    /// Distance travelled per tick
    pub const BALL_SPEED: f32 = 6.0;
    /// Initial heading in degrees (0 = up, clockwise)
    pub const BALL_START_HEADING: f32 = 45.0;
    /// Wall bounce jitter, degrees either side
    pub const WALL_JITTER: f32 = 5.0;
    /// Radii past the bottom bound before the ball is lost
    pub const BALL_LOSS_DEPTH: f32 = 20.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 64.0;
    pub const PADDLE_HEIGHT: f32 = 8.0;
    /// Force applied per held direction key
    pub const PADDLE_FORCE: f32 = 20.0;
    /// Paddle highlight after a hit
    pub const PADDLE_FLASH_MS: u32 = 150;

    /// Force model
    pub const FORCE_MASS: f32 = 100.0;
    pub const FORCE_RAMP: f32 = 0.2;
    pub const FORCE_DECAY: f32 = 0.1;
    pub const FORCE_TIME_MAX: f32 = 20.0;
    /// Maximum paddle lean in degrees
    pub const MAX_LEAN: f32 = 45.0;

    /// Delay between a shape being struck and removed
    pub const SHAPE_REMOVAL_MS: u32 = 100;

    /// Default key bindings (A / D)
    pub const LEFT_KEY: u32 = 65;
    pub const RIGHT_KEY: u32 = 68;
}

/// Degrees to radians
#[inline]
pub fn rad(degrees: f32) -> f32 {
    degrees.to_radians()
}

/// Linearly map `value` from `[from_lo, from_hi]` onto `[to_lo, to_hi]`.
///
/// A degenerate source range maps everything to the middle of the target.
#[inline]
pub fn map_range(value: f64, from_lo: f64, from_hi: f64, to_lo: f64, to_hi: f64) -> f64 {
    let span = from_hi - from_lo;
    if span == 0.0 || !span.is_finite() {
        return (to_lo + to_hi) / 2.0;
    }
    to_lo + (to_hi - to_lo) * ((value - from_lo) / span)
}

/// Build an SVG path outline through `points`.
///
/// `close` appends `Z` after the last point. A single point yields a bare
/// move-to.
pub fn path_d(points: &[Vec2], close: bool) -> String {
    let last = points.len().saturating_sub(1);
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        // Writing into a String cannot fail
        let _ = if i == 0 {
            write!(d, "M{} {}", p.x, p.y)
        } else {
            write!(d, ", L{} {}", p.x, p.y)
        };
        if i == last && i != 0 && close {
            d.push('Z');
        }
    }
    d
}
