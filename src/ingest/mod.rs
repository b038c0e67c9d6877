//! Map data ingestion
//!
//! GeoJSON in, arena-space `MapFeature`s out: decode, optionally project,
//! then fit the whole collection into the playfield.

pub mod fit;
pub mod geojson;
pub mod projection;

use std::path::Path;

use glam::DVec2;

pub use fit::{Extent, Fit};
pub use geojson::{GeoFeature, Geometry, parse};
pub use projection::Projection;

use crate::Settings;
use crate::error::{Error, Result};
use crate::sim::MapFeature;

/// Project every feature and fit the collection to the arena.
///
/// Without a projection the coordinates are taken as planar with y up.
pub fn project_and_fit(
    features: &[GeoFeature],
    projection: Option<Projection>,
    settings: &Settings,
) -> Vec<MapFeature> {
    let project = |p: DVec2| projection.map_or(p, |proj| proj.project(p));

    let mut extent = Extent::default();
    for feature in features {
        feature
            .geometry
            .for_each_position(|p| extent.include(project(p)));
    }
    let Some((min, max)) = extent.bounds() else {
        return Vec::new();
    };
    let fit = Fit::new(min, max, settings, projection.is_none());
    log::debug!(
        "Fitting extent {min}..{max} into {}x{}",
        fit.width,
        fit.height
    );

    features
        .iter()
        .map(|feature| MapFeature {
            kind: feature.geometry.kind(),
            outline: feature.geometry.to_outline(|p| fit.apply(project(p))),
            properties: feature.properties.clone(),
        })
        .collect()
}

/// Decode a GeoJSON document and fit it to the arena.
///
/// An unknown projection name is logged and the data used unprojected.
pub fn load(json: &str, projection: Option<&str>, settings: &Settings) -> Result<Vec<MapFeature>> {
    let features = parse(json)?;
    let projection = projection.and_then(|name| {
        let found = Projection::from_name(name);
        if found.is_none() {
            log::warn!("Unknown projection '{name}', using planar coordinates");
        }
        found
    });
    log::info!(
        "Read {} features ({})",
        features.len(),
        projection.map_or("planar", |p| p.as_str())
    );
    Ok(project_and_fit(&features, projection, settings))
}

/// Read a GeoJSON file and fit it to the arena
pub fn load_path(
    path: impl AsRef<Path>,
    projection: Option<&str>,
    settings: &Settings,
) -> Result<Vec<MapFeature>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load(&json, projection, settings)
}
