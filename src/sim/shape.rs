//! Breakable map shapes
//!
//! Each input feature becomes one `Shape`. A shape breaks the first time the
//! ball touches it, lingers briefly in the `Struck` state, then disappears.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ball::Ball;
use super::collision::{Aabb, point_in_polygon, segment_intersects_aabb};
use super::random::RandomSource;
use crate::path_d;

/// Feature property bag
pub type Properties = serde_json::Map<String, Value>;

/// Geometry type of the source feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
}

/// Arena-space outline of a feature
#[derive(Debug, Clone, PartialEq)]
pub enum Outline {
    /// Point and MultiPoint
    Points(Vec<Vec2>),
    /// LineString and MultiLineString, one entry per line
    Lines(Vec<Vec<Vec2>>),
    /// Polygon and MultiPolygon: polygons of rings, outer ring first
    Polygons(Vec<Vec<Vec<Vec2>>>),
}

impl Outline {
    /// Every ring/line/point group as a flat list of parts
    pub fn parts(&self) -> Vec<&[Vec2]> {
        match self {
            Outline::Points(points) => vec![points.as_slice()],
            Outline::Lines(lines) => lines.iter().map(Vec::as_slice).collect(),
            Outline::Polygons(polygons) => polygons
                .iter()
                .flat_map(|rings| rings.iter().map(Vec::as_slice))
                .collect(),
        }
    }

    pub fn bounding_box(&self) -> Option<Aabb> {
        Aabb::from_points(self.parts().into_iter().flatten())
    }
}

/// A projected feature ready to become a shape
#[derive(Debug, Clone, PartialEq)]
pub struct MapFeature {
    pub kind: ShapeKind,
    pub outline: Outline,
    pub properties: Properties,
}

/// Shape lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeState {
    Intact,
    /// Hit; removed once the countdown runs out
    Struck { ticks_left: u32 },
    Removed,
}

#[derive(Debug, Clone)]
pub struct Shape {
    id: u32,
    kind: ShapeKind,
    outline: Outline,
    bbox: Aabb,
    /// SVG path of every part, closed
    path: String,
    /// Display hue in degrees
    hue: u16,
    /// Heading given to the ball when this shape breaks
    rebound: f32,
    properties: Properties,
    state: ShapeState,
    removal_ticks: u32,
}

impl Shape {
    /// Build a shape from a projected feature.
    ///
    /// Returns `None` when the feature has no coordinates.
    pub fn new(
        id: u32,
        feature: MapFeature,
        removal_ticks: u32,
        rng: &mut impl RandomSource,
    ) -> Option<Self> {
        let bbox = feature.outline.bounding_box()?;
        let path = feature
            .outline
            .parts()
            .into_iter()
            .map(|part| path_d(part, true) + " ")
            .collect();

        Some(Self {
            id,
            kind: feature.kind,
            outline: feature.outline,
            bbox,
            path,
            hue: (rng.next_unit() * 360.0).floor() as u16 % 360,
            rebound: rng.next_unit() * 360.0,
            properties: feature.properties,
            state: ShapeState::Intact,
            removal_ticks,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    pub fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn hue(&self) -> u16 {
        self.hue
    }

    pub fn rebound(&self) -> f32 {
        self.rebound
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn state(&self) -> ShapeState {
        self.state
    }

    /// Test the ball against this shape and advance its lifecycle.
    ///
    /// Returns the feature properties on the tick the shape breaks and `None`
    /// on every other call.
    pub fn collide(&mut self, ball: &mut Ball) -> Option<&Properties> {
        match self.state {
            ShapeState::Removed => None,
            ShapeState::Struck { ticks_left } => {
                self.state = match ticks_left {
                    0 | 1 => ShapeState::Removed,
                    n => ShapeState::Struck { ticks_left: n - 1 },
                };
                None
            }
            ShapeState::Intact => {
                if !self.touches(ball) {
                    return None;
                }
                ball.redirect(self.rebound);
                self.state = ShapeState::Struck {
                    ticks_left: self.removal_ticks,
                };
                Some(&self.properties)
            }
        }
    }

    /// Ball's small hitbox (corners or centre) meets the outline
    fn touches(&self, ball: &Ball) -> bool {
        let hitbox = ball.hitbox(false);
        if !self.bbox.touches(&hitbox) {
            return false;
        }

        match &self.outline {
            Outline::Polygons(polygons) => {
                let corners = hitbox.corners();
                corners
                    .iter()
                    .chain(std::iter::once(&ball.pos))
                    .any(|p| polygons.iter().any(|rings| point_in_polygon(*p, rings)))
            }
            Outline::Lines(lines) => lines.iter().any(|line| {
                line.windows(2)
                    .any(|seg| segment_intersects_aabb(seg[0], seg[1], &hitbox))
            }),
            Outline::Points(points) => points.iter().any(|p| hitbox.contains_point(*p)),
        }
    }
}

/// Display label for a feature: the value under `key`, or empty.
///
/// Strings are used as-is; numbers and `true` are printed; anything else
/// gives an empty label.
pub fn label(properties: &Properties, key: &str) -> String {
    match properties.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(true)) => "true".to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::FixedRandom;
    use proptest::prelude::*;
    use serde_json::json;

    fn square(min: Vec2, size: f32) -> Vec<Vec2> {
        vec![
            min,
            min + Vec2::new(size, 0.0),
            min + Vec2::splat(size),
            min + Vec2::new(0.0, size),
            min,
        ]
    }

    fn props(value: Value) -> Properties {
        match value {
            Value::Object(map) => map,
            _ => Properties::new(),
        }
    }

    fn polygon_feature(min: Vec2, size: f32) -> MapFeature {
        MapFeature {
            kind: ShapeKind::Polygon,
            outline: Outline::Polygons(vec![vec![square(min, size)]]),
            properties: props(json!({ "name": "Square" })),
        }
    }

    fn ball_at(pos: Vec2) -> Ball {
        let mut ball = Ball::new(700.0, 700.0);
        ball.pos = pos;
        ball
    }

    #[test]
    fn test_new_computes_bbox_and_path() {
        let shape = Shape::new(1, polygon_feature(Vec2::new(10.0, 20.0), 5.0), 6, &mut FixedRandom(0.5))
            .expect("shape");
        assert_eq!(shape.bounding_box().min, Vec2::new(10.0, 20.0));
        assert_eq!(shape.bounding_box().max, Vec2::new(15.0, 25.0));
        assert_eq!(shape.path(), "M10 20, L15 20, L15 25, L10 25, L10 20Z ");
        assert_eq!(shape.hue(), 180);
        assert_eq!(shape.rebound(), 180.0);
        assert_eq!(shape.state(), ShapeState::Intact);
    }

    #[test]
    fn test_empty_feature_is_rejected() {
        let feature = MapFeature {
            kind: ShapeKind::MultiPoint,
            outline: Outline::Points(Vec::new()),
            properties: Properties::new(),
        };
        assert!(Shape::new(1, feature, 6, &mut FixedRandom(0.5)).is_none());
    }

    #[test]
    fn test_polygon_hit_lifecycle() {
        let mut shape =
            Shape::new(1, polygon_feature(Vec2::new(100.0, 100.0), 50.0), 2, &mut FixedRandom(0.25))
                .expect("shape");
        let mut ball = ball_at(Vec2::new(125.0, 125.0));

        let hit = shape.collide(&mut ball).cloned();
        assert_eq!(hit.map(|p| label(&p, "name")), Some("Square".to_string()));
        assert_eq!(ball.heading(), 90.0);
        assert_eq!(shape.state(), ShapeState::Struck { ticks_left: 2 });

        assert!(shape.collide(&mut ball).is_none());
        assert_eq!(shape.state(), ShapeState::Struck { ticks_left: 1 });
        assert!(shape.collide(&mut ball).is_none());
        assert_eq!(shape.state(), ShapeState::Removed);
        assert!(shape.collide(&mut ball).is_none());
        assert_eq!(shape.state(), ShapeState::Removed);
    }

    #[test]
    fn test_corner_overlap_counts() {
        let mut shape = Shape::new(1, polygon_feature(Vec2::new(100.0, 100.0), 50.0), 6, &mut FixedRandom(0.5))
            .expect("shape");
        // Centre outside, lower-right corner of the small hitbox inside
        let mut ball = ball_at(Vec2::new(96.0, 96.0));
        assert!(shape.collide(&mut ball).is_some());
    }

    #[test]
    fn test_miss_leaves_state() {
        let mut shape = Shape::new(1, polygon_feature(Vec2::new(100.0, 100.0), 50.0), 6, &mut FixedRandom(0.5))
            .expect("shape");
        let mut ball = ball_at(Vec2::new(300.0, 300.0));
        ball.redirect(12.0);
        assert!(shape.collide(&mut ball).is_none());
        assert_eq!(shape.state(), ShapeState::Intact);
        assert_eq!(ball.heading(), 12.0);
    }

    #[test]
    fn test_polygon_hole_is_empty() {
        let feature = MapFeature {
            kind: ShapeKind::Polygon,
            outline: Outline::Polygons(vec![vec![
                square(Vec2::new(0.0, 0.0), 300.0),
                square(Vec2::new(100.0, 100.0), 100.0),
            ]]),
            properties: Properties::new(),
        };
        let mut shape = Shape::new(1, feature, 6, &mut FixedRandom(0.5)).expect("shape");
        let mut ball = ball_at(Vec2::new(150.0, 150.0));
        assert!(shape.collide(&mut ball).is_none());
    }

    #[test]
    fn test_line_and_point_hits() {
        let line = MapFeature {
            kind: ShapeKind::LineString,
            outline: Outline::Lines(vec![vec![Vec2::new(0.0, 200.0), Vec2::new(400.0, 200.0)]]),
            properties: Properties::new(),
        };
        let mut shape = Shape::new(1, line, 6, &mut FixedRandom(0.5)).expect("shape");
        assert!(shape.collide(&mut ball_at(Vec2::new(200.0, 250.0))).is_none());
        assert!(shape.collide(&mut ball_at(Vec2::new(200.0, 204.0))).is_some());

        let point = MapFeature {
            kind: ShapeKind::Point,
            outline: Outline::Points(vec![Vec2::new(50.0, 50.0)]),
            properties: Properties::new(),
        };
        let mut shape = Shape::new(2, point, 6, &mut FixedRandom(0.5)).expect("shape");
        assert!(shape.collide(&mut ball_at(Vec2::new(60.0, 60.0))).is_none());
        assert!(shape.collide(&mut ball_at(Vec2::new(53.0, 47.0))).is_some());
    }

    #[test]
    fn test_label() {
        let p = props(json!({ "name": "France", "pop": 67, "flag": true, "none": null }));
        assert_eq!(label(&p, "name"), "France");
        assert_eq!(label(&p, "pop"), "67");
        assert_eq!(label(&p, "flag"), "true");
        assert_eq!(label(&p, "none"), "");
        assert_eq!(label(&p, "missing"), "");
    }

    proptest! {
        #[test]
        fn prop_reports_at_most_once(
            positions in prop::collection::vec((0.0f32..300.0, 0.0f32..300.0), 1..200),
        ) {
            let mut shape = Shape::new(1, polygon_feature(Vec2::new(100.0, 100.0), 80.0), 6, &mut FixedRandom(0.5))
                .expect("shape");
            let mut reports = 0;
            for (x, y) in positions {
                if shape.collide(&mut ball_at(Vec2::new(x, y))).is_some() {
                    reports += 1;
                }
            }
            prop_assert!(reports <= 1);
        }
    }
}
