//! Separating Axis Theorem test for convex polygons (the narrow phase).
//!
//! Two convex polygons are disjoint iff some edge normal of either polygon
//! separates their projections. When no axis separates them the pair is
//! reported as colliding, which covers crossing edges, shared boundaries and
//! one polygon sitting entirely inside the other.

use crate::geometry::Point;

/// Unit normals `(-dy, dx) / len` of every edge, closing last-to-first.
///
/// Zero-length edges contribute no axis.
pub fn polygon_axes(vertices: &[Point]) -> Vec<Point> {
    let n = vertices.len();
    let mut axes = Vec::with_capacity(n);

    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let length = (dx * dx + dy * dy).sqrt();
        if length == 0.0 {
            continue;
        }
        axes.push(Point::new(-dy / length, dx / length));
    }

    axes
}

/// Interval `(min, max)` covered by the vertices projected onto `axis`.
///
/// An empty vertex list projects to the inverted interval `(+inf, -inf)`.
#[inline]
pub fn project(vertices: &[Point], axis: Point) -> (f64, f64) {
    vertices.iter().map(|v| v.dot(axis)).fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(min, max), d| (min.min(d), max.max(d)),
    )
}

/// True if the polygons intersect, touch or one contains the other.
///
/// Returns early on the first separating axis. With no usable axes at all
/// (both inputs degenerate) nothing can separate them and the answer is
/// `true`, which keeps bad templates from being placed on top of anything.
pub fn polygons_collide(a: &[Point], b: &[Point]) -> bool {
    for axis in polygon_axes(a).into_iter().chain(polygon_axes(b)) {
        let (min_a, max_a) = project(a, axis);
        let (min_b, max_b) = project(b, axis);
        if max_a < min_b || max_b < min_a {
            return false;
        }
    }
    true
}

// ============================================================================
// TESTS
// ============================================================================
