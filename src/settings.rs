//! Arena and input settings
//!
//! Loaded from an optional JSON file; every field falls back to its default.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};
use crate::sim::Aabb;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    /// Arena width in arena units
    pub width: f32,
    /// Arena height in arena units
    pub height: f32,
    /// Border margin around the playfield
    pub margin: f32,

    // === Input ===
    /// Key code that pushes the paddle left
    pub left_key: u32,
    /// Key code that pushes the paddle right
    pub right_key: u32,

    // === Display ===
    /// Property used as the label of a broken shape
    pub property_key: String,

    // === Simulation ===
    /// Seed for the cosmetic/bounce random source
    pub seed: u64,
    /// Frames per second the host drives `tick` at
    pub tick_hz: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            margin: ARENA_MARGIN,

            left_key: LEFT_KEY,
            right_key: RIGHT_KEY,

            property_key: "name".to_string(),

            seed: 0x6d61_7062,
            tick_hz: TICK_HZ,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document (missing fields use defaults)
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.tick_hz == 0 {
            return Err(Error::Invalid("tick_hz must be at least 1".to_string()));
        }
        if !(self.width > self.margin * 2.0 && self.height > self.margin * 2.0) {
            return Err(Error::Invalid(format!(
                "arena {}x{} leaves no room inside margin {}",
                self.width, self.height, self.margin
            )));
        }
        Ok(())
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Playfield bounds (arena minus margin on every side)
    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            Vec2::splat(self.margin),
            Vec2::new(self.width - self.margin, self.height - self.margin),
        )
    }

    /// Convert a duration in milliseconds to whole ticks at `tick_hz`.
    ///
    /// Any non-zero duration lasts at least one tick.
    pub fn ms_to_ticks(&self, ms: u32) -> u32 {
        let ticks = (u64::from(ms) * u64::from(self.tick_hz)).div_ceil(1000);
        let ticks = u32::try_from(ticks).unwrap_or(u32::MAX);
        if ms > 0 { ticks.max(1) } else { 0 }
    }
}
