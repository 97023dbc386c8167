//! Shape templates and placed shapes.
//!
//! A [`ShapeTemplate`] is a convex outline in local coordinates, centred
//! near the origin and sized to fit a 20x20 box. Templates are loaded once
//! and shared read-only through `Arc`.
//!
//! A [`PlacedShape`] is a template plus position, scale and a colour tag.
//! The colour is opaque to the geometry code; it only travels along for
//! whoever renders the result.

use std::f64::consts::PI;
use std::sync::Arc;

use crate::aabb::{compute_aabb, Aabb, DEFAULT_UNIT_SIZE};
use crate::error::{Result, ScatterError};
use crate::geometry::{transform_vertices, Point, Scale};

/// Largest coordinate a template may have and still sit inside the
/// default culling box at stretch 1.
pub const TEMPLATE_HALF_EXTENT: f64 = DEFAULT_UNIT_SIZE / 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ShapeTemplate {
    name: String,
    vertices: Vec<Point>,
}

impl ShapeTemplate {
    /// Create a template, rejecting outlines with fewer than 3 vertices.
    pub fn new(name: impl Into<String>, vertices: Vec<Point>) -> Result<Self> {
        let name = name.into();
        if vertices.len() < 3 {
            return Err(ScatterError::DegenerateTemplate {
                name,
                vertices: vertices.len(),
            });
        }
        Ok(Self { name, vertices })
    }

    /// Create a template without validation.
    ///
    /// Used for the built-in outlines and by tests. Degenerate outlines never
    /// panic in SAT, but their collision results are not meaningful: an
    /// empty outline collides with nothing, a point or segment may collide
    /// with anything.
    pub fn unchecked(name: impl Into<String>, vertices: Vec<Point>) -> Self {
        Self {
            name: name.into(),
            vertices,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Largest `|x|` or `|y|` over all vertices.
    ///
    /// The culling box of a shape at stretch `s` spans `s * unit_size / 2`
    /// each way from its position, so the outline stays inside it only
    /// while `reach() <= unit_size / 2`.
    pub fn reach(&self) -> f64 {
        self.vertices
            .iter()
            .fold(0.0, |acc: f64, p| acc.max(p.x.abs()).max(p.y.abs()))
    }

    /// Scale the outline about the origin so `reach()` is at most `half`.
    ///
    /// Returns the template unchanged if it already fits.
    pub fn fitted(mut self, half: f64) -> Self {
        let reach = self.reach();
        if reach > half {
            let factor = half / reach;
            for p in &mut self.vertices {
                p.x *= factor;
                p.y *= factor;
            }
        }
        self
    }
}

/// A template instance at a position and scale.
///
/// World vertices are cached and only recomputed by [`PlacedShape::move_to`],
/// which is only called on candidates before they are committed.
#[derive(Debug, Clone)]
pub struct PlacedShape {
    template: Arc<ShapeTemplate>,
    position: Point,
    scale: Scale,
    color: String,
    world: Vec<Point>,
}

impl PlacedShape {
    pub fn new(template: Arc<ShapeTemplate>, position: Point, scale: Scale, color: impl Into<String>) -> Self {
        let world = transform_vertices(template.vertices(), position, scale);
        Self {
            template,
            position,
            scale,
            color: color.into(),
            world,
        }
    }

    pub fn move_to(&mut self, position: Point) {
        self.position = position;
        self.world = transform_vertices(self.template.vertices(), position, self.scale);
    }

    pub fn template(&self) -> &Arc<ShapeTemplate> {
        &self.template
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn world_vertices(&self) -> &[Point] {
        &self.world
    }

    /// Culling box derived from position and scale.
    pub fn aabb(&self, unit_size: f64) -> Aabb {
        compute_aabb(self.position, self.scale, unit_size)
    }
}

// ============================================================================
// BUILT-IN TEMPLATES
// ============================================================================

/// Names of the built-in templates, in pool order.
pub const BUILTIN_NAMES: &[&str] = &["square", "triangle", "arrow", "circle", "diamond", "hexagon"];

fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
    coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

fn regular_polygon(sides: usize, radius: f64) -> Vec<Point> {
    (0..sides)
        .map(|i| {
            let theta = 2.0 * PI * i as f64 / sides as f64;
            Point::new(radius * theta.cos(), radius * theta.sin())
        })
        .collect()
}

/// Look up a built-in template by name (case-insensitive).
pub fn builtin(name: &str) -> Option<ShapeTemplate> {
    let vertices = match name.to_lowercase().as_str() {
        "square" => pts(&[(10.0, -10.0), (10.0, 10.0), (-10.0, 10.0), (-10.0, -10.0)]),
        "triangle" => pts(&[(10.0, -8.66), (0.0, 8.66), (-10.0, -8.66)]),
        "arrow" => pts(&[(-10.0, 0.0), (10.0, 0.0), (0.0, 10.0)]),
        "circle" => regular_polygon(20, 10.0),
        "diamond" => pts(&[(0.0, 10.0), (-10.0, 0.0), (0.0, -10.0), (10.0, 0.0)]),
        "hexagon" => regular_polygon(6, 10.0),
        _ => return None,
    };
    let canonical = BUILTIN_NAMES.iter().find(|n| n.eq_ignore_ascii_case(name))?;
    Some(ShapeTemplate::unchecked(*canonical, vertices))
}

/// All built-in templates.
pub fn builtins() -> Vec<ShapeTemplate> {
    BUILTIN_NAMES.iter().filter_map(|name| builtin(name)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::bounding_box;

    #[test]
    fn rejects_two_vertex_template() {
        let err = ShapeTemplate::new("line", pts(&[(0.0, 0.0), (1.0, 1.0)])).unwrap_err();
        assert!(matches!(err, ScatterError::DegenerateTemplate { vertices: 2, .. }));
    }

    #[test]
    fn builtins_fit_unit_box() {
        for template in builtins() {
            let bbox = bounding_box(template.vertices()).unwrap();
            assert!(bbox.min_x >= -10.0 - 1e-9 && bbox.max_x <= 10.0 + 1e-9, "{} too wide", template.name());
            assert!(bbox.min_y >= -10.0 - 1e-9 && bbox.max_y <= 10.0 + 1e-9, "{} too tall", template.name());
            assert!(template.vertices().len() >= 3);
        }
    }

    #[test]
    fn reach_is_largest_coordinate() {
        let t = ShapeTemplate::new("t", pts(&[(-3.0, 1.0), (2.0, -7.5), (0.0, 4.0)])).unwrap();
        assert_eq!(t.reach(), 7.5);
        for template in builtins() {
            assert!(template.reach() <= TEMPLATE_HALF_EXTENT + 1e-9, "{}", template.name());
        }
    }

    #[test]
    fn fitted_shrinks_only_oversized_outlines() {
        let big = ShapeTemplate::new("big", pts(&[(-30.0, -30.0), (30.0, -30.0), (30.0, 30.0), (-30.0, 30.0)])).unwrap();
        let fitted = big.fitted(TEMPLATE_HALF_EXTENT);
        assert!((fitted.reach() - 10.0).abs() < 1e-9);
        let corner = fitted.vertices()[0];
        assert!((corner.x + 10.0).abs() < 1e-9 && (corner.y + 10.0).abs() < 1e-9, "{:?}", corner);

        let small = builtin("diamond").unwrap();
        assert_eq!(small.clone().fitted(TEMPLATE_HALF_EXTENT), small);
    }

    #[test]
    fn builtin_lookup_is_case_insensitive() {
        assert_eq!(builtin("Square").unwrap().name(), "square");
        assert!(builtin("turtle").is_none());
    }

    #[test]
    fn move_to_refreshes_world_vertices() {
        let template = Arc::new(builtin("square").unwrap());
        let mut shape = PlacedShape::new(template, Point::new(0.0, 0.0), Scale::uniform(2.0), "green");
        assert_eq!(shape.world_vertices()[0], Point::new(20.0, -20.0));

        shape.move_to(Point::new(100.0, 50.0));
        assert_eq!(shape.position(), Point::new(100.0, 50.0));
        assert_eq!(shape.world_vertices()[0], Point::new(120.0, 30.0));
        assert_eq!(shape.aabb(20.0), Aabb::new(80.0, 30.0, 120.0, 70.0));
    }
}
