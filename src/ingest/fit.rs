//! Fit projected coordinates into the arena viewport

use glam::{DVec2, Vec2};

use crate::Settings;
use crate::map_range;

/// Linear map from source extent to arena coordinates
///
/// Width spans the arena minus margins; height follows the source aspect
/// ratio. Screen-space sources (projected) keep their y direction, raw
/// geographic sources are flipped so north is up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    pub extent_min: DVec2,
    pub extent_max: DVec2,
    pub margin: f64,
    pub width: f64,
    pub height: f64,
    pub flip_y: bool,
}

impl Fit {
    pub fn new(extent_min: DVec2, extent_max: DVec2, settings: &Settings, flip_y: bool) -> Self {
        let margin = settings.margin as f64;
        let width = settings.width as f64 - margin * 2.0;
        let extent = extent_max - extent_min;
        let height = if extent.x > 0.0 {
            width * extent.y / extent.x
        } else {
            width
        };
        Self {
            extent_min,
            extent_max,
            margin,
            width,
            height,
            flip_y,
        }
    }

    pub fn apply(&self, p: DVec2) -> Vec2 {
        let x = map_range(
            p.x,
            self.extent_min.x,
            self.extent_max.x,
            self.margin,
            self.margin + self.width,
        );
        let (from_lo, from_hi) = if self.flip_y {
            (self.extent_max.y, self.extent_min.y)
        } else {
            (self.extent_min.y, self.extent_max.y)
        };
        let y = map_range(p.y, from_lo, from_hi, self.margin, self.margin + self.height);
        Vec2::new(x as f32, y as f32)
    }
}

/// Extent of a set of points, `None` when empty
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extent(Option<(DVec2, DVec2)>);

impl Extent {
    pub fn include(&mut self, p: DVec2) {
        if !p.is_finite() {
            return;
        }
        self.0 = Some(match self.0 {
            None => (p, p),
            Some((min, max)) => (min.min(p), max.max(p)),
        });
    }

    pub fn bounds(&self) -> Option<(DVec2, DVec2)> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_keeps_aspect() {
        let fit = Fit::new(DVec2::ZERO, DVec2::new(20.0, 10.0), &Settings::default(), false);
        assert_eq!(fit.width, 680.0);
        assert_eq!(fit.height, 340.0);
        assert_eq!(fit.apply(DVec2::ZERO), Vec2::new(10.0, 10.0));
        assert_eq!(fit.apply(DVec2::new(20.0, 10.0)), Vec2::new(690.0, 350.0));
    }

    #[test]
    fn test_fit_flips_geographic_y() {
        let fit = Fit::new(DVec2::new(-10.0, -5.0), DVec2::new(10.0, 5.0), &Settings::default(), true);
        // North-west corner lands top-left
        assert_eq!(fit.apply(DVec2::new(-10.0, 5.0)), Vec2::new(10.0, 10.0));
        assert_eq!(fit.apply(DVec2::new(10.0, -5.0)), Vec2::new(690.0, 350.0));
    }

    #[test]
    fn test_degenerate_extent() {
        let p = DVec2::new(3.0, 3.0);
        let fit = Fit::new(p, p, &Settings::default(), true);
        assert_eq!(fit.height, 680.0);
        assert_eq!(fit.apply(p), Vec2::new(350.0, 350.0));
    }

    #[test]
    fn test_extent() {
        let mut extent = Extent::default();
        assert_eq!(extent.bounds(), None);
        extent.include(DVec2::new(1.0, 5.0));
        extent.include(DVec2::new(-2.0, 7.0));
        extent.include(DVec2::new(f64::INFINITY, 0.0));
        assert_eq!(extent.bounds(), Some((DVec2::new(-2.0, 5.0), DVec2::new(1.0, 7.0))));
    }
}
