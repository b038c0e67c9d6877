//! Game state and per-tick outputs
//!
//! `Game` owns the ball, the paddle and every shape. Nothing is shared.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::collision::Aabb;
use super::player::Player;
use super::random::{RandomSource, SeededRandom};
use super::shape::{MapFeature, Shape, ShapeState};
use crate::Settings;
use crate::consts::SHAPE_REMOVAL_MS;

/// Match outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Ball in play, shapes remaining
    Running,
    /// Every shape broken
    Won,
    /// Ball fell out with shapes remaining
    Lost,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Running)
    }

    /// Terminal message shown over the map
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Outcome::Running => None,
            Outcome::Won => Some("You Win"),
            Outcome::Lost => Some("Game Over"),
        }
    }
}

/// Things that happened during one tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    WallHit(super::ball::Wall),
    PaddleHit,
    ShapeBroken { id: u32, label: String },
    Finished(Outcome),
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game<R: RandomSource = SeededRandom> {
    pub settings: Settings,
    pub ball: Ball,
    pub player: Player,
    /// In input feature order
    pub shapes: Vec<Shape>,
    pub(super) rng: R,
    pub(super) broken: u32,
    pub(super) outcome: Outcome,
    pub(super) last_label: String,
    /// Simulation tick counter
    pub(super) time_ticks: u64,
    bounds: Aabb,
    next_id: u32,
}

impl Game<SeededRandom> {
    /// New game seeded from the settings
    pub fn new(settings: Settings) -> Self {
        let rng = SeededRandom::new(settings.seed);
        Self::with_rng(settings, rng)
    }
}

impl<R: RandomSource> Game<R> {
    /// New game drawing cosmetic and bounce randomness from `rng`
    pub fn with_rng(settings: Settings, rng: R) -> Self {
        Self {
            ball: Ball::new(settings.width, settings.height),
            player: Player::new(&settings),
            shapes: Vec::new(),
            rng,
            broken: 0,
            outcome: Outcome::Running,
            last_label: String::new(),
            time_ticks: 0,
            bounds: settings.bounds(),
            next_id: 1,
            settings,
        }
    }

    /// Replace the shape wall with one shape per feature and start a fresh
    /// match: score, outcome and label are cleared, ball and paddle re-served.
    ///
    /// Features without coordinates are skipped. Returns the shape count.
    pub fn load_shapes(&mut self, features: impl IntoIterator<Item = MapFeature>) -> usize {
        let removal_ticks = self.settings.ms_to_ticks(SHAPE_REMOVAL_MS);
        self.shapes.clear();
        self.broken = 0;
        self.outcome = Outcome::Running;
        self.last_label.clear();
        self.ball = Ball::new(self.settings.width, self.settings.height);
        self.player = Player::new(&self.settings);
        for feature in features {
            let id = self.next_id;
            self.next_id += 1;
            match Shape::new(id, feature, removal_ticks, &mut self.rng) {
                Some(shape) => self.shapes.push(shape),
                None => log::warn!("Skipping feature {id}: no coordinates"),
            }
        }
        log::info!("Loaded {} shapes", self.shapes.len());
        self.shapes.len()
    }

    /// Playfield bounds
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// (broken, total)
    pub fn score(&self) -> (u32, u32) {
        (self.broken, self.total())
    }

    pub fn total(&self) -> u32 {
        self.shapes.len() as u32
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Label of the most recently broken shape
    pub fn last_label(&self) -> &str {
        &self.last_label
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Snapshot for rendering surfaces
    pub fn view(&self) -> View {
        View {
            tick: self.time_ticks,
            ball: BallView {
                pos: self.ball.pos,
                heading: self.ball.heading(),
                radius: self.ball.radius(),
            },
            paddle: PaddleView {
                pos: self.player.pos,
                size: self.player.size(),
                rotation: self.player.rotation(),
                highlighted: self.player.is_highlighted(),
            },
            shapes: self
                .shapes
                .iter()
                .map(|shape| ShapeView {
                    id: shape.id(),
                    state: shape.state(),
                    hue: shape.hue(),
                })
                .collect(),
            score: self.score(),
            label: self.last_label.clone(),
            message: self.outcome.message(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BallView {
    pub pos: Vec2,
    pub heading: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PaddleView {
    pub pos: Vec2,
    pub size: Vec2,
    /// Lean indicator angle in degrees
    pub rotation: f32,
    pub highlighted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShapeView {
    pub id: u32,
    pub state: ShapeState,
    pub hue: u16,
}

/// Everything a surface needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub tick: u64,
    pub ball: BallView,
    pub paddle: PaddleView,
    pub shapes: Vec<ShapeView>,
    /// (broken, total)
    pub score: (u32, u32),
    pub label: String,
    pub message: Option<&'static str>,
}
