//! GeoJSON input model
//!
//! Only what the game needs: a feature collection of simple geometries with
//! optional properties.

use glam::{DVec2, Vec2};
use serde::Deserialize;
use serde_json::Value;

use crate::sim::{Outline, Properties, ShapeKind};

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<RawFeature>,
}

/// Feature as found in the document; the geometry is decoded lazily so one
/// unsupported geometry does not reject the whole collection
#[derive(Debug, Clone, Deserialize)]
pub struct RawFeature {
    #[serde(default)]
    pub geometry: Option<Value>,
    #[serde(default)]
    pub properties: Option<Properties>,
}

/// A position; any ordinates past the second (altitude) are ignored
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "Vec<f64>")]
pub struct Position(pub DVec2);

impl TryFrom<Vec<f64>> for Position {
    type Error = String;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        match value.as_slice() {
            [x, y, ..] => Ok(Position(DVec2::new(*x, *y))),
            _ => Err(format!("position needs two ordinates, got {}", value.len())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(Position),
    MultiPoint(Vec<Position>),
    LineString(Vec<Position>),
    MultiLineString(Vec<Vec<Position>>),
    Polygon(Vec<Vec<Position>>),
    MultiPolygon(Vec<Vec<Vec<Position>>>),
}

/// A decoded feature in source coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct GeoFeature {
    pub geometry: Geometry,
    pub properties: Properties,
}

impl Geometry {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Geometry::Point(_) => ShapeKind::Point,
            Geometry::MultiPoint(_) => ShapeKind::MultiPoint,
            Geometry::LineString(_) => ShapeKind::LineString,
            Geometry::MultiLineString(_) => ShapeKind::MultiLineString,
            Geometry::Polygon(_) => ShapeKind::Polygon,
            Geometry::MultiPolygon(_) => ShapeKind::MultiPolygon,
        }
    }

    /// Visit every position
    pub fn for_each_position(&self, mut f: impl FnMut(DVec2)) {
        let mut visit = |positions: &[Position]| positions.iter().for_each(|p| f(p.0));
        match self {
            Geometry::Point(p) => visit(std::slice::from_ref(p)),
            Geometry::MultiPoint(ps) | Geometry::LineString(ps) => visit(ps),
            Geometry::MultiLineString(lines) | Geometry::Polygon(lines) => {
                lines.iter().for_each(|line| visit(line))
            }
            Geometry::MultiPolygon(polygons) => polygons
                .iter()
                .flatten()
                .for_each(|ring| visit(ring)),
        }
    }

    /// Map into arena space through `f`
    pub fn to_outline(&self, f: impl Fn(DVec2) -> Vec2) -> Outline {
        let part = |positions: &[Position]| positions.iter().map(|p| f(p.0)).collect::<Vec<_>>();
        match self {
            Geometry::Point(p) => Outline::Points(vec![f(p.0)]),
            Geometry::MultiPoint(ps) => Outline::Points(part(ps)),
            Geometry::LineString(ps) => Outline::Lines(vec![part(ps)]),
            Geometry::MultiLineString(lines) => {
                Outline::Lines(lines.iter().map(|line| part(line)).collect())
            }
            Geometry::Polygon(rings) => {
                Outline::Polygons(vec![rings.iter().map(|ring| part(ring)).collect()])
            }
            Geometry::MultiPolygon(polygons) => Outline::Polygons(
                polygons
                    .iter()
                    .map(|rings| rings.iter().map(|ring| part(ring)).collect())
                    .collect(),
            ),
        }
    }
}

/// Decode every usable feature in a GeoJSON `FeatureCollection`.
///
/// Features with a missing or unsupported geometry are skipped with a
/// warning. Only a malformed document is an error.
pub fn parse(json: &str) -> serde_json::Result<Vec<GeoFeature>> {
    let collection: FeatureCollection = serde_json::from_str(json)?;
    let features = collection
        .features
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            let Some(value) = raw.geometry else {
                log::warn!("Skipping feature {index}: no geometry");
                return None;
            };
            match serde_json::from_value::<Geometry>(value) {
                Ok(geometry) => Some(GeoFeature {
                    geometry,
                    properties: raw.properties.unwrap_or_default(),
                }),
                Err(err) => {
                    log::warn!("Skipping feature {index}: {err}");
                    None
                }
            }
        })
        .collect();
    Ok(features)
}
