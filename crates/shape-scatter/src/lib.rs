//! # shape-scatter
//!
//! Random, non-overlapping placement of convex shapes on a bounded canvas.
//!
//! The pipeline, leaf first:
//! - [`geometry`]: template vertices -> world vertices
//! - [`aabb`]: cheap box overlap (broad phase)
//! - [`sat`]: exact convex overlap (narrow phase)
//! - [`collision`]: candidate vs. everything placed so far
//! - [`placement`]: random retries under a deadline
//! - [`fill`]: pick template + colour, place, repeat until time is up
//!
//! ## Rust Lesson #7: Modules
//!
//! `pub mod foo;` loads `foo.rs` and exports it; `pub use foo::Bar;`
//! re-exports `Bar` at the crate root so callers can skip the module path.

pub mod aabb;
pub mod canvas;
pub mod clock;
pub mod collision;
pub mod error;
pub mod fill;
pub mod geometry;
pub mod placement;
pub mod sat;
pub mod shape;
pub mod shapefile;
pub mod svg;

// Re-export common types at crate root for convenience.
pub use aabb::{aabb_overlaps, compute_aabb, Aabb, DEFAULT_UNIT_SIZE};
pub use canvas::{canvas_bounds, CanvasRange, DEFAULT_SPAN, DEFAULT_STEP};
pub use clock::{Clock, ManualClock, SystemClock};
pub use collision::{is_colliding_with_any, shapes_collide, CollisionSettings};
pub use error::{Result, ScatterError};
pub use fill::{fill, FillOutcome, FillRequest, FillSummary};
pub use geometry::{bounding_box, transform_vertices, Point, Scale};
pub use placement::{attempt_place, PlacedSet, Placement, PlacementAttempt, PlacementContext};
pub use sat::polygons_collide;
pub use shape::{builtin, builtins, PlacedShape, ShapeTemplate, BUILTIN_NAMES, TEMPLATE_HALF_EXTENT};
pub use shapefile::{load_shape_file, parse_shape_file};
pub use svg::templates_from_svg;
