//! Placement search: random retries against a deadline.
//!
//! A candidate is moved to random grid positions until one is collision
//! free (commit) or the deadline passes (abandon). Only a commit touches
//! the placed set, and it only ever appends.

use std::time::Instant;

use log::{debug, trace};
use rand::Rng;

use crate::canvas::CanvasRange;
use crate::clock::Clock;
use crate::collision::{is_colliding_with_any, CollisionSettings};
use crate::geometry::Point;
use crate::sat::polygons_collide;
use crate::shape::PlacedShape;

/// Append-only, insertion-ordered collection of committed shapes.
///
/// Every member was collision free against all earlier members when it
/// was inserted, and members are never moved afterwards.
#[derive(Debug, Clone, Default)]
pub struct PlacedSet {
    shapes: Vec<PlacedShape>,
}

impl PlacedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlacedShape> {
        self.shapes.iter()
    }

    pub fn as_slice(&self) -> &[PlacedShape] {
        &self.shapes
    }

    pub fn into_vec(self) -> Vec<PlacedShape> {
        self.shapes
    }

    pub(crate) fn push(&mut self, shape: PlacedShape) {
        self.shapes.push(shape);
    }

    /// Brute-force pairwise re-check. Returns the first colliding pair.
    ///
    /// Runs SAT on every pair with no AABB cull, so it also catches shapes
    /// whose outline reaches past their culling box. O(n²); meant for
    /// verification after a run, not for the hot path.
    pub fn find_collision_pair(&self) -> Option<(usize, usize)> {
        for (i, a) in self.shapes.iter().enumerate() {
            for (j, b) in self.shapes.iter().enumerate().skip(i + 1) {
                if polygons_collide(a.world_vertices(), b.world_vertices()) {
                    return Some((i, j));
                }
            }
        }
        None
    }
}

impl<'a> IntoIterator for &'a PlacedSet {
    type Item = &'a PlacedShape;
    type IntoIter = std::slice::Iter<'a, PlacedShape>;

    fn into_iter(self) -> Self::IntoIter {
        self.shapes.iter()
    }
}

/// Everything a placement needs, passed explicitly instead of living in
/// globals: the placed set, the position grid, the deadline and the
/// collision settings.
#[derive(Debug, Clone)]
pub struct PlacementContext {
    placed: PlacedSet,
    range: CanvasRange,
    deadline: Instant,
    settings: CollisionSettings,
}

impl PlacementContext {
    pub fn new(range: CanvasRange, settings: CollisionSettings, deadline: Instant) -> Self {
        Self {
            placed: PlacedSet::new(),
            range,
            deadline,
            settings,
        }
    }

    pub fn placed(&self) -> &PlacedSet {
        &self.placed
    }

    pub fn range(&self) -> &CanvasRange {
        &self.range
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn settings(&self) -> &CollisionSettings {
        &self.settings
    }

    pub fn into_placed(self) -> PlacedSet {
        self.placed
    }
}

/// Final state of one placement search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// The candidate now lives in the placed set at this position.
    Committed(Point),
    /// The deadline passed first; the candidate was dropped.
    Abandoned,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementAttempt {
    pub outcome: Placement,
    /// Positions drawn before the search ended.
    pub samples: usize,
}

impl PlacementAttempt {
    pub fn is_committed(&self) -> bool {
        matches!(self.outcome, Placement::Committed(_))
    }
}

/// Try random positions for `candidate` until one fits or time runs out.
///
/// The clock is read before every draw; the loop continues while
/// `now <= deadline`. A deadline already in the past gives `Abandoned`
/// with zero samples.
pub fn attempt_place<R, C>(
    ctx: &mut PlacementContext,
    mut candidate: PlacedShape,
    rng: &mut R,
    clock: &C,
) -> PlacementAttempt
where
    R: Rng,
    C: Clock + ?Sized,
{
    let mut samples = 0;

    while clock.now() <= ctx.deadline {
        let position = ctx.range.sample(rng);
        samples += 1;
        candidate.move_to(position);

        if !is_colliding_with_any(&candidate, &ctx.placed, &ctx.settings) {
            debug!(
                "placed {} #{} at ({}, {}) after {} samples",
                candidate.template().name(),
                ctx.placed.len() + 1,
                position.x,
                position.y,
                samples
            );
            ctx.placed.push(candidate);
            return PlacementAttempt {
                outcome: Placement::Committed(position),
                samples,
            };
        }
        trace!("rejected ({}, {})", position.x, position.y);
    }

    debug!(
        "abandoned {} after {} samples",
        candidate.template().name(),
        samples
    );
    PlacementAttempt {
        outcome: Placement::Abandoned,
        samples,
    }
}
