//! Discrete candidate positions on the canvas.
//!
//! Positions are quantised to a step grid so the sample space is finite and
//! a fixed seed replays the same sequence of candidate positions.

use rand::Rng;

use crate::aabb::Aabb;
use crate::error::{Result, ScatterError};
use crate::geometry::Point;

/// Fraction of each half dimension that positions may cover.
pub const DEFAULT_SPAN: f64 = 0.8;

/// Distance between neighbouring candidate coordinates.
pub const DEFAULT_STEP: u32 = 10;

/// Candidate x and y coordinates, centred on the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasRange {
    xs: Vec<i64>,
    ys: Vec<i64>,
}

impl CanvasRange {
    /// Build the grid for a `width` x `height` canvas.
    ///
    /// Each axis runs `-half, -half + step, ...` up to but excluding `half`,
    /// where `half = trunc(dimension / 2 * span)`.
    pub fn new(width: f64, height: f64, span: f64, step: u32) -> Result<Self> {
        let empty = || ScatterError::EmptyCanvasRange { width, height, span, step };
        if step == 0 {
            return Err(empty());
        }

        let xs = axis_values(width, span, step);
        let ys = axis_values(height, span, step);
        if xs.is_empty() || ys.is_empty() {
            return Err(empty());
        }
        Ok(Self { xs, ys })
    }

    pub fn xs(&self) -> &[i64] {
        &self.xs
    }

    pub fn ys(&self) -> &[i64] {
        &self.ys
    }

    /// Number of distinct positions.
    pub fn len(&self) -> usize {
        self.xs.len() * self.ys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Uniform draw with replacement; repeats are expected.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Point {
        let x = self.xs[rng.random_range(0..self.xs.len())];
        let y = self.ys[rng.random_range(0..self.ys.len())];
        Point::new(x as f64, y as f64)
    }
}

fn axis_values(dimension: f64, span: f64, step: u32) -> Vec<i64> {
    let half = (dimension / 2.0 * span).trunc();
    if !half.is_finite() || half <= 0.0 {
        return Vec::new();
    }
    let half = half as i64;
    (-half..half).step_by(step as usize).collect()
}

/// The full canvas as a box centred on the origin.
pub fn canvas_bounds(width: f64, height: f64) -> Aabb {
    Aabb::new(-width / 2.0, -height / 2.0, width / 2.0, height / 2.0)
}
