//! Core geometry types and the polygon transform.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! `#[derive(Clone, Copy)]` on a two-float struct means it is passed around
//! by value like a number. Every geometry helper here takes `Point` and
//! `Scale` by value and borrows vertex lists as `&[Point]`.

use serde::{Deserialize, Serialize};

use crate::aabb::Aabb;

/// A 2D point. World space is y-up with the canvas centre at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Non-uniform scale applied to a template before translation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub sx: f64,
    pub sy: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn dot(&self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }
}

impl Scale {
    #[inline]
    pub fn new(sx: f64, sy: f64) -> Self {
        Self { sx, sy }
    }

    /// Same factor on both axes.
    #[inline]
    pub fn uniform(factor: f64) -> Self {
        Self { sx: factor, sy: factor }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}

/// Map template vertices into world space: `(vx * sx + x, vy * sy + y)`.
///
/// An empty template gives an empty list; callers treat that as "no
/// geometry" rather than an error.
pub fn transform_vertices(local: &[Point], position: Point, scale: Scale) -> Vec<Point> {
    local
        .iter()
        .map(|v| Point::new(v.x * scale.sx + position.x, v.y * scale.sy + position.y))
        .collect()
}

/// Tight bounding box of a vertex list, `None` when empty.
///
/// This is the true extent of the outline. Collision culling uses
/// [`crate::aabb::compute_aabb`] instead, which derives the box from scale.
pub fn bounding_box(points: &[Point]) -> Option<Aabb> {
    if points.is_empty() {
        return None;
    }

    let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_x = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

    Some(Aabb::new(min_x, min_y, max_x, max_y))
}

// ============================================================================
// TESTS
// ============================================================================
