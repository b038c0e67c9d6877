//! Named cartographic projections
//!
//! Projections take longitude/latitude in degrees and return planar
//! coordinates with y pointing down, ready to be fitted to the arena.

use std::f64::consts::FRAC_PI_4;

use glam::DVec2;

/// Web-mercator latitude cutoff
const MERCATOR_MAX_LAT: f64 = 85.051_128_78;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    Equirectangular,
    Mercator,
    Miller,
    Sinusoidal,
}

impl Projection {
    pub const ALL: [Projection; 4] = [
        Projection::Equirectangular,
        Projection::Mercator,
        Projection::Miller,
        Projection::Sinusoidal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Projection::Equirectangular => "equirectangular",
            Projection::Mercator => "mercator",
            Projection::Miller => "miller",
            Projection::Sinusoidal => "sinusoidal",
        }
    }

    /// Look up a projection by name, case-insensitive, with or without a
    /// `geo` prefix (`"geoMercator"`, `"mercator"`)
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_lowercase();
        let bare = lower.strip_prefix("geo").unwrap_or(&lower);
        Self::ALL.into_iter().find(|p| p.as_str() == bare)
    }

    /// Project `[longitude, latitude]` in degrees
    pub fn project(&self, lon_lat: DVec2) -> DVec2 {
        let lambda = lon_lat.x.to_radians();
        let phi = lon_lat.y.to_radians();
        let (x, y) = match self {
            Projection::Equirectangular => (lambda, phi),
            Projection::Mercator => {
                let phi = lon_lat.y.clamp(-MERCATOR_MAX_LAT, MERCATOR_MAX_LAT).to_radians();
                (lambda, (FRAC_PI_4 + phi / 2.0).tan().ln())
            }
            Projection::Miller => (lambda, 1.25 * (FRAC_PI_4 + 0.4 * phi).tan().ln()),
            Projection::Sinusoidal => (lambda * phi.cos(), phi),
        };
        DVec2::new(x, -y)
    }
}
