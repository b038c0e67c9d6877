//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per `tick` call, no wall-clock time
//! - Randomness only through the game's `RandomSource`
//! - Stable iteration order (shapes in input order)
//! - No rendering or platform dependencies

pub mod ball;
pub mod collision;
pub mod force;
pub mod player;
pub mod random;
pub mod shape;
pub mod state;
pub mod tick;

pub use ball::{Ball, Wall};
pub use collision::{
    Aabb, point_in_polygon, point_in_ring, point_on_segment, segment_intersects_aabb,
};
pub use force::Force;
pub use player::Player;
pub use random::{FixedRandom, RandomSource, SeededRandom};
pub use shape::{MapFeature, Outline, Properties, Shape, ShapeKind, ShapeState, label};
pub use state::{BallView, Game, GameEvent, Outcome, PaddleView, ShapeView, View};
pub use tick::{CancelToken, TickInput, run, tick};
