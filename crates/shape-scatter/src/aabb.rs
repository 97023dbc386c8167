//! Axis-aligned bounding boxes: the broad phase of collision checks.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Scale};

/// Size in world units of a template at scale 1.
///
/// Templates are expected to fit in a 20x20 box around their origin, so the
/// half extent of a placed shape is `scale * 10`.
pub const DEFAULT_UNIT_SIZE: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Aabb {
    #[inline]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// True when `other` lies inside `self` without touching any edge.
    pub fn contains_strictly(&self, other: &Aabb) -> bool {
        other.min_x > self.min_x
            && other.max_x < self.max_x
            && other.min_y > self.min_y
            && other.max_y < self.max_y
    }
}

/// Box centred on `position` with half extents `scale * unit_size / 2`.
pub fn compute_aabb(position: Point, scale: Scale, unit_size: f64) -> Aabb {
    let hw = scale.sx * unit_size / 2.0;
    let hh = scale.sy * unit_size / 2.0;
    Aabb::new(position.x - hw, position.y - hh, position.x + hw, position.y + hh)
}

/// Overlap test. Boxes sharing an edge count as overlapping, so touching
/// placements fall through to the exact test instead of being culled.
#[inline]
pub fn aabb_overlaps(a: &Aabb, b: &Aabb) -> bool {
    !(a.max_x < b.min_x || a.min_x > b.max_x || a.max_y < b.min_y || a.min_y > b.max_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_edge_overlaps() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(10.0, 0.0, 20.0, 10.0);
        assert!(aabb_overlaps(&a, &b));
    }

    #[test]
    fn gap_does_not_overlap() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(11.0, 0.0, 20.0, 10.0);
        assert!(!aabb_overlaps(&a, &b));
    }

    #[test]
    fn overlap_is_symmetric() {
        let boxes = [
            Aabb::new(0.0, 0.0, 10.0, 10.0),
            Aabb::new(5.0, 5.0, 15.0, 15.0),
            Aabb::new(10.0, 0.0, 20.0, 10.0),
            Aabb::new(11.0, 0.0, 20.0, 10.0),
            Aabb::new(-30.0, -30.0, -20.0, -20.0),
            Aabb::new(2.0, 2.0, 3.0, 3.0),
            Aabb::new(0.0, 10.0, 10.0, 20.0),
        ];
        for a in &boxes {
            for b in &boxes {
                assert_eq!(aabb_overlaps(a, b), aabb_overlaps(b, a), "{:?} vs {:?}", a, b);
            }
        }
    }

    #[test]
    fn vertical_gap_does_not_overlap() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(0.0, 10.5, 10.0, 20.0);
        assert!(!aabb_overlaps(&a, &b));
    }

    #[test]
    fn nested_boxes_overlap() {
        let outer = Aabb::new(-50.0, -50.0, 50.0, 50.0);
        let inner = Aabb::new(-1.0, -1.0, 1.0, 1.0);
        assert!(aabb_overlaps(&outer, &inner));
        assert!(outer.contains_strictly(&inner));
        assert!(!inner.contains_strictly(&outer));
    }

    #[test]
    fn compute_from_scale() {
        let bbox = compute_aabb(Point::new(100.0, -40.0), Scale::new(2.0, 3.0), DEFAULT_UNIT_SIZE);
        assert_eq!(bbox, Aabb::new(80.0, -70.0, 120.0, -10.0));
        assert_eq!(bbox.width(), 40.0);
        assert_eq!(bbox.height(), 60.0);
    }

    #[test]
    fn touching_edge_is_not_strictly_inside() {
        let canvas = Aabb::new(-100.0, -100.0, 100.0, 100.0);
        let edge = Aabb::new(80.0, 0.0, 100.0, 20.0);
        assert!(!canvas.contains_strictly(&edge));
    }
}
