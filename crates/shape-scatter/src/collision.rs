//! Collision query: broad phase (AABB) then narrow phase (SAT).

use crate::aabb::{aabb_overlaps, Aabb, DEFAULT_UNIT_SIZE};
use crate::sat::polygons_collide;
use crate::shape::PlacedShape;

/// Parameters shared by every collision query in a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionSettings {
    /// World size of a template at scale 1, used for culling boxes.
    pub unit_size: f64,
    /// When set, a candidate must sit strictly inside this box.
    pub bounds: Option<Aabb>,
}

impl Default for CollisionSettings {
    fn default() -> Self {
        Self {
            unit_size: DEFAULT_UNIT_SIZE,
            bounds: None,
        }
    }
}

/// Does `candidate` conflict with any already placed shape?
///
/// The candidate's box and vertices are computed once. Placed shapes whose
/// boxes don't overlap are skipped without running SAT, and the scan stops
/// at the first conflict. An empty placed set never conflicts.
pub fn is_colliding_with_any<'a, I>(candidate: &PlacedShape, placed: I, settings: &CollisionSettings) -> bool
where
    I: IntoIterator<Item = &'a PlacedShape>,
{
    let candidate_box = candidate.aabb(settings.unit_size);

    if let Some(bounds) = settings.bounds {
        if !bounds.contains_strictly(&candidate_box) {
            return true;
        }
    }

    let candidate_vertices = candidate.world_vertices();

    placed.into_iter().any(|other| {
        aabb_overlaps(&candidate_box, &other.aabb(settings.unit_size))
            && polygons_collide(candidate_vertices, other.world_vertices())
    })
}

/// Pair test with the same broad/narrow split as [`is_colliding_with_any`].
pub fn shapes_collide(a: &PlacedShape, b: &PlacedShape, unit_size: f64) -> bool {
    aabb_overlaps(&a.aabb(unit_size), &b.aabb(unit_size))
        && polygons_collide(a.world_vertices(), b.world_vertices())
}
