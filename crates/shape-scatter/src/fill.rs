//! Scene fill driver.
//!
//! Keeps drawing a random template and colour, stretching it, and handing
//! it to [`attempt_place`] until the overall deadline passes. Every
//! placement shares that one deadline, so a candidate created late in the
//! run may get only a handful of samples, or none.

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::info;
use rand::Rng;

use crate::canvas::CanvasRange;
use crate::clock::Clock;
use crate::collision::CollisionSettings;
use crate::error::{Result, ScatterError};
use crate::geometry::{Point, Scale};
use crate::placement::{attempt_place, PlacedSet, PlacementContext};
use crate::shape::{PlacedShape, ShapeTemplate};

/// Inputs for one fill run.
#[derive(Debug, Clone, Copy)]
pub struct FillRequest<'a> {
    pub shapes: &'a [Arc<ShapeTemplate>],
    pub colors: &'a [String],
    /// Applied to both axes of every candidate.
    pub stretch: u32,
    pub duration: Duration,
}

/// Counters for a finished run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillSummary {
    pub started: Instant,
    pub elapsed: Duration,
    pub placed: usize,
    pub abandoned: usize,
    pub samples: usize,
}

#[derive(Debug, Clone)]
pub struct FillOutcome {
    pub placed: PlacedSet,
    pub summary: FillSummary,
}

/// Fill the canvas until `request.duration` has elapsed.
///
/// The placed set is created here and returned with the summary; nothing
/// else holds it during the run.
pub fn fill<R, C>(
    request: &FillRequest<'_>,
    range: CanvasRange,
    settings: CollisionSettings,
    rng: &mut R,
    clock: &C,
) -> Result<FillOutcome>
where
    R: Rng,
    C: Clock + ?Sized,
{
    if request.shapes.is_empty() {
        return Err(ScatterError::EmptyPool("shape"));
    }
    if request.colors.is_empty() {
        return Err(ScatterError::EmptyPool("color"));
    }
    if request.stretch == 0 {
        return Err(ScatterError::InvalidStretch(request.stretch));
    }
    // The broad phase only sees the culling box; an outline poking out of
    // it could overlap a neighbour without SAT ever running.
    let limit = settings.unit_size / 2.0;
    if let Some(template) = request.shapes.iter().find(|t| t.reach() > limit + 1e-9) {
        return Err(ScatterError::TemplateTooLarge {
            name: template.name().to_string(),
            reach: template.reach(),
            limit,
        });
    }

    let started = clock.now();
    let deadline = started + request.duration;
    let mut ctx = PlacementContext::new(range, settings, deadline);
    let scale = Scale::uniform(request.stretch as f64);

    info!(
        "filling for {:.1}s: {} shapes, {} colors, stretch {}, {} grid positions",
        request.duration.as_secs_f64(),
        request.shapes.len(),
        request.colors.len(),
        request.stretch,
        ctx.range().len()
    );

    let mut abandoned = 0;
    let mut samples = 0;

    while clock.now() <= deadline {
        let template = &request.shapes[rng.random_range(0..request.shapes.len())];
        let color = &request.colors[rng.random_range(0..request.colors.len())];
        let candidate = PlacedShape::new(Arc::clone(template), Point::new(0.0, 0.0), scale, color.as_str());

        let attempt = attempt_place(&mut ctx, candidate, rng, clock);
        samples += attempt.samples;
        if !attempt.is_committed() {
            abandoned += 1;
        }
    }

    let elapsed = clock.now().saturating_duration_since(started);
    let placed = ctx.into_placed();
    let summary = FillSummary {
        started,
        elapsed,
        placed: placed.len(),
        abandoned,
        samples,
    };

    info!(
        "placed {} shapes in {:.2}s ({} abandoned, {} samples)",
        summary.placed,
        elapsed.as_secs_f64(),
        abandoned,
        samples
    );

    Ok(FillOutcome { placed, summary })
}
