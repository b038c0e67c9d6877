//! The player's paddle

use glam::Vec2;

use super::collision::Aabb;
use super::force::Force;
use super::tick::TickInput;
use crate::Settings;
use crate::consts::*;

#[derive(Debug, Clone)]
pub struct Player {
    /// Centre of the paddle
    pub pos: Vec2,
    size: Vec2,
    force: Force,
    left_key: u32,
    right_key: u32,
    /// Ticks of hit highlight remaining
    flash_ticks: u32,
    flash_duration: u32,
}

impl Player {
    /// Paddle centred at the bottom of the arena
    pub fn new(settings: &Settings) -> Self {
        let pos = Vec2::new(settings.width / 2.0, settings.height - PADDLE_HEIGHT * 4.0);
        Self {
            pos,
            size: Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
            force: Force::new(pos.x),
            left_key: settings.left_key,
            right_key: settings.right_key,
            flash_ticks: 0,
            flash_duration: settings.ms_to_ticks(PADDLE_FLASH_MS),
        }
    }

    /// Apply held keys and slide within `bounds`
    pub fn advance(&mut self, bounds: &Aabb, input: &TickInput) {
        self.flash_ticks = self.flash_ticks.saturating_sub(1);

        if input.is_held(self.left_key) {
            self.force.apply(-PADDLE_FORCE);
        }
        if input.is_held(self.right_key) {
            self.force.apply(PADDLE_FORCE);
        }

        let half = self.size.x / 2.0;
        self.force.update(bounds.min.x + half, bounds.max.x - half);
        self.pos.x = self.force.position();
    }

    pub fn hitbox(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size / 2.0)
    }

    /// Start the hit highlight
    pub fn hit(&mut self) {
        self.flash_ticks = self.flash_duration;
    }

    pub fn is_highlighted(&self) -> bool {
        self.flash_ticks > 0
    }

    /// Current lean in degrees, imposed on the ball on contact
    pub fn rotation(&self) -> f32 {
        self.force.rotation()
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }
}
