//! The ball: free motion, wall bounces and paddle contact

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::player::Player;
use super::random::RandomSource;
use crate::consts::*;
use crate::rad;

/// Arena edge identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Wall {
    Left,
    Top,
    Right,
    Bottom,
}

#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    /// Direction of travel in degrees (0 = up, clockwise)
    heading: f32,
    radius: f32,
    speed: f32,
    /// Fell out past the bottom; terminal
    stopped: bool,
    /// Wall crossed on the most recent contact, cleared by any redirect
    last_wall: Option<Wall>,
    /// Paddle overlap seen on the previous tick
    touching_paddle: bool,
}

impl Ball {
    /// Ball at its serve position for an arena of the given size
    pub fn new(arena_width: f32, arena_height: f32) -> Self {
        Self {
            pos: Vec2::new(arena_width / 2.0, arena_height - BALL_RADIUS * 6.0),
            heading: BALL_START_HEADING,
            radius: BALL_RADIUS,
            speed: BALL_SPEED,
            stopped: false,
            last_wall: None,
            touching_paddle: false,
        }
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn last_wall(&self) -> Option<Wall> {
        self.last_wall
    }

    /// Point the ball in a new direction.
    ///
    /// Forgets the last wall contact, so the next wall crossing always
    /// bounces.
    pub fn redirect(&mut self, heading: f32) {
        self.heading = heading;
        self.last_wall = None;
    }

    /// Move one step and bounce off `bounds`.
    ///
    /// Returns the wall crossed this tick, if any. When several edges are
    /// crossed at once the later check wins: right, top, left, then bottom.
    pub fn advance(&mut self, bounds: &Aabb, rng: &mut impl RandomSource) -> Option<Wall> {
        if self.stopped {
            return None;
        }

        let h = rad(self.heading);
        let next = self.pos + Vec2::new(h.sin(), -h.cos()) * self.speed;
        let delta = next - self.pos;
        let r = self.radius;

        let crossed_right = next.x + r > bounds.max.x;
        let crossed_top = next.y - r < bounds.min.y;
        let crossed_left = next.x - r < bounds.min.x;
        let crossed_bottom = next.y + r > bounds.max.y;

        let mut wall = None;
        if crossed_right || crossed_top || crossed_left || crossed_bottom {
            let jitter = rng.range(-WALL_JITTER, WALL_JITTER);
            let mut heading = self.heading;

            if crossed_right {
                wall = Some(Wall::Right);
                heading = if delta.y < 0.0 { -45.0 } else { -135.0 };
            }
            if crossed_top {
                wall = Some(Wall::Top);
                heading = if delta.x < 0.0 { -135.0 } else { 135.0 };
            }
            if crossed_left {
                wall = Some(Wall::Left);
                heading = if delta.y < 0.0 { 45.0 } else { -225.0 };
            }
            if crossed_bottom {
                wall = Some(Wall::Bottom);
            }

            if next.y + r > bounds.max.y + r * BALL_LOSS_DEPTH {
                self.stopped = true;
                log::info!("Ball lost at ({:.1}, {:.1})", next.x, next.y);
            }

            if wall != Some(Wall::Bottom) && wall != self.last_wall {
                self.heading = heading + jitter;
            }
            self.last_wall = wall;
        }

        self.pos = next;
        wall
    }

    /// Square hitbox: half-width `radius` when `full`, else `radius / 2`
    pub fn hitbox(&self, full: bool) -> Aabb {
        let factor = if full { 1.0 } else { 0.5 };
        Aabb::from_center(self.pos, Vec2::splat(self.radius * factor))
    }

    /// Bounce off the paddle.
    ///
    /// Fires once per contact: overlap on consecutive ticks counts as the
    /// same contact. Returns true when the paddle was hit this tick.
    pub fn collide_player(&mut self, player: &mut Player) -> bool {
        let overlapping = self.hitbox(true).overlaps(&player.hitbox());
        let fresh = overlapping && !self.touching_paddle;
        self.touching_paddle = overlapping;

        if fresh {
            self.redirect(player.rotation());
            player.hit();
            log::debug!("Paddle hit, new heading {:.1}", self.heading);
        }
        fresh
    }
}
