//! Collision primitives for axis-aligned hitboxes and map outlines
//!
//! Everything in the arena is tested either as a box against a box (ball
//! against paddle) or as points/segments against a map outline (ball against
//! a shape).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box centred on `center` extending `half` on each axis
    pub fn from_center(center: Vec2, half: Vec2) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Smallest box containing every point, `None` when there are none
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec2>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        Some(iter.fold(Self::new(first, first), |acc, p| Self {
            min: acc.min.min(*p),
            max: acc.max.max(*p),
        }))
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Corners in outline order: (min,min), (min,max), (max,max), (max,min)
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.min.x, self.max.y),
            self.max,
            Vec2::new(self.max.x, self.min.y),
        ]
    }

    /// Point inside or on the edge
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Interiors intersect (touching edges do not count)
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Boxes share at least one point (touching edges count)
    #[inline]
    pub fn touches(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

/// Relative tolerance for boundary tests
const BOUNDARY_EPSILON: f32 = 1e-4;

/// `p` lies on the segment `a`-`b`
pub fn point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> bool {
    let ab = b - a;
    let ap = p - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return ap.length_squared() <= BOUNDARY_EPSILON * BOUNDARY_EPSILON;
    }
    let tolerance = BOUNDARY_EPSILON * len_sq.sqrt().max(1.0);
    if ab.perp_dot(ap).abs() > tolerance * len_sq.sqrt() {
        return false;
    }
    let t = ab.dot(ap) / len_sq;
    (0.0..=1.0).contains(&t)
}

/// `p` lies on any edge of the ring, including the closing edge
fn on_ring_boundary(p: Vec2, ring: &[Vec2]) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let (Some(&first), Some(&last)) = (ring.first(), ring.last()) else {
        return false;
    };
    ring.windows(2).any(|edge| point_on_segment(p, edge[0], edge[1]))
        || point_on_segment(p, last, first)
}

/// Even-odd ray cast; boundary points may land on either side
fn ray_cast(p: Vec2, ring: &[Vec2]) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (a, b) = (ring[i], ring[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// `p` inside or on the boundary of one ring
///
/// Rings may be open or explicitly closed.
pub fn point_in_ring(p: Vec2, ring: &[Vec2]) -> bool {
    on_ring_boundary(p, ring) || ray_cast(p, ring)
}

/// Point inside a polygon given as an outer ring followed by holes.
///
/// The outer boundary counts as inside; so does a hole's boundary, only a
/// hole's interior is excluded.
pub fn point_in_polygon(p: Vec2, rings: &[Vec<Vec2>]) -> bool {
    let Some((outer, holes)) = rings.split_first() else {
        return false;
    };
    point_in_ring(p, outer)
        && !holes
            .iter()
            .any(|hole| !on_ring_boundary(p, hole) && ray_cast(p, hole))
}

/// Segment `a`-`b` passes through (or touches) the box
///
/// Liang-Barsky clipping of the segment against the box slabs.
pub fn segment_intersects_aabb(a: Vec2, b: Vec2, aabb: &Aabb) -> bool {
    let d = b - a;
    let mut t_min = 0.0_f32;
    let mut t_max = 1.0_f32;

    for (origin, dir, lo, hi) in [
        (a.x, d.x, aabb.min.x, aabb.max.x),
        (a.y, d.y, aabb.min.y, aabb.max.y),
    ] {
        if dir.abs() < f32::EPSILON {
            if origin < lo || origin > hi {
                return false;
            }
            continue;
        }
        let mut t0 = (lo - origin) / dir;
        let mut t1 = (hi - origin) / dir;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(min: f32, max: f32) -> Vec<Vec2> {
        vec![
            Vec2::new(min, min),
            Vec2::new(max, min),
            Vec2::new(max, max),
            Vec2::new(min, max),
            Vec2::new(min, min),
        ]
    }

    #[test]
    fn test_aabb_overlap_vs_touch() {
        let a = Aabb::new(Vec2::ZERO, Vec2::splat(10.0));
        let b = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(20.0, 10.0));
        let c = Aabb::new(Vec2::splat(5.0), Vec2::splat(15.0));

        assert!(!a.overlaps(&b));
        assert!(a.touches(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }

    #[test]
    fn test_aabb_from_points() {
        let points = [Vec2::new(3.0, -1.0), Vec2::new(-2.0, 4.0), Vec2::new(1.0, 1.0)];
        let aabb = Aabb::from_points(&points).expect("non-empty");
        assert_eq!(aabb.min, Vec2::new(-2.0, -1.0));
        assert_eq!(aabb.max, Vec2::new(3.0, 4.0));
        assert!(Aabb::from_points(&Vec::<Vec2>::new()).is_none());
    }

    #[test]
    fn test_aabb_corners() {
        let aabb = Aabb::from_center(Vec2::new(10.0, 10.0), Vec2::splat(2.0));
        assert_eq!(
            aabb.corners(),
            [
                Vec2::new(8.0, 8.0),
                Vec2::new(8.0, 12.0),
                Vec2::new(12.0, 12.0),
                Vec2::new(12.0, 8.0),
            ]
        );
    }

    #[test]
    fn test_point_in_ring() {
        let ring = square(0.0, 10.0);
        assert!(point_in_ring(Vec2::new(5.0, 5.0), &ring));
        assert!(!point_in_ring(Vec2::new(15.0, 5.0), &ring));
        assert!(!point_in_ring(Vec2::new(5.0, -0.5), &ring));
    }

    #[test]
    fn test_point_in_polygon_with_hole() {
        let rings = vec![square(0.0, 10.0), square(4.0, 6.0)];
        assert!(point_in_polygon(Vec2::new(2.0, 2.0), &rings));
        assert!(!point_in_polygon(Vec2::new(5.0, 5.0), &rings));
        assert!(!point_in_polygon(Vec2::new(5.0, 5.0), &[]));
    }

    #[test]
    fn test_boundary_counts_as_inside() {
        let ring = square(0.0, 10.0);
        for p in [
            Vec2::new(5.0, 0.0),
            Vec2::new(10.0, 5.0),
            Vec2::new(5.0, 10.0),
            Vec2::new(0.0, 5.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 0.0),
        ] {
            assert!(point_in_ring(p, &ring), "{p} on the edge");
        }

        // Open ring: the closing edge is still an edge
        let open = &ring[..4];
        assert!(point_in_ring(Vec2::new(0.0, 5.0), open));
    }

    #[test]
    fn test_hole_boundary_counts_as_inside() {
        let rings = vec![square(0.0, 10.0), square(4.0, 6.0)];
        assert!(point_in_polygon(Vec2::new(4.0, 5.0), &rings));
        assert!(point_in_polygon(Vec2::new(6.0, 6.0), &rings));
        assert!(point_in_polygon(Vec2::new(0.0, 3.0), &rings));
        assert!(!point_in_polygon(Vec2::new(5.0, 5.0), &rings));
    }

    #[test]
    fn test_point_on_segment() {
        let (a, b) = (Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(point_on_segment(Vec2::new(5.0, 5.0), a, b));
        assert!(point_on_segment(a, a, b));
        assert!(!point_on_segment(Vec2::new(5.0, 5.5), a, b));
        assert!(!point_on_segment(Vec2::new(11.0, 11.0), a, b));
        assert!(point_on_segment(a, a, a));
    }

    #[test]
    fn test_segment_intersects_aabb() {
        let aabb = Aabb::new(Vec2::ZERO, Vec2::splat(10.0));

        // Crossing straight through
        assert!(segment_intersects_aabb(Vec2::new(-5.0, 5.0), Vec2::new(15.0, 5.0), &aabb));
        // Diagonal clipping a corner
        assert!(segment_intersects_aabb(Vec2::new(-5.0, 2.0), Vec2::new(5.0, 12.0), &aabb));
        // Entirely inside
        assert!(segment_intersects_aabb(Vec2::new(2.0, 2.0), Vec2::new(3.0, 3.0), &aabb));
        // Passing beside
        assert!(!segment_intersects_aabb(Vec2::new(-5.0, 12.0), Vec2::new(15.0, 12.0), &aabb));
        // Stops short
        assert!(!segment_intersects_aabb(Vec2::new(-10.0, 5.0), Vec2::new(-1.0, 5.0), &aabb));
    }
}
