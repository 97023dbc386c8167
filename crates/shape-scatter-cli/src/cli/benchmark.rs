//! Benchmark command implementation.
//!
//! Fills a canvas for a fixed budget, then times collision queries of
//! random candidates against the result and reports how much work the
//! AABB broad phase saves.

use std::hint::black_box;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Args;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use shape_scatter::{
    aabb_overlaps, builtins, fill, is_colliding_with_any, CanvasRange, CollisionSettings, FillRequest, PlacedShape,
    Scale, SystemClock,
};

use super::config::DEFAULT_COLORS;

#[derive(Debug, Args)]
pub struct BenchArgs {
    /// Number of collision queries to time
    #[arg(short = 'n', long, default_value_t = 100_000)]
    pub queries: usize,

    #[arg(long, default_value_t = 1)]
    pub seed: u64,

    #[arg(short, long, default_value_t = 1)]
    pub stretch: u32,

    /// Milliseconds spent building the placed set
    #[arg(long, default_value_t = 1000)]
    pub fill_ms: u64,
}

/// Execute the benchmark command.
pub fn cmd_benchmark(args: &BenchArgs) -> Result<()> {
    let shapes: Vec<_> = builtins().into_iter().map(Arc::new).collect();
    let colors: Vec<String> = DEFAULT_COLORS.iter().map(|c| c.to_string()).collect();
    let settings = CollisionSettings::default();
    let range = CanvasRange::new(1344.0, 756.0, 0.8, 10)?;

    let request = FillRequest {
        shapes: &shapes,
        colors: &colors,
        stretch: args.stretch.max(1),
        duration: Duration::from_millis(args.fill_ms),
    };
    let mut rng = StdRng::seed_from_u64(args.seed);
    let outcome = fill(&request, range.clone(), settings, &mut rng, &SystemClock)?;
    let placed = outcome.placed;

    println!("Placed {} shapes in {:?} ({} samples)", placed.len(), outcome.summary.elapsed, outcome.summary.samples);

    let scale = Scale::uniform(request.stretch as f64);
    let candidates: Vec<PlacedShape> = (0..args.queries)
        .map(|_| {
            let template = &shapes[rng.random_range(0..shapes.len())];
            PlacedShape::new(Arc::clone(template), range.sample(&mut rng), scale, "bench")
        })
        .collect();

    let start = Instant::now();
    let mut hits = 0usize;
    for candidate in &candidates {
        if black_box(is_colliding_with_any(candidate, &placed, &settings)) {
            hits += 1;
        }
    }
    let elapsed = start.elapsed();

    // Broad-phase statistics, counted separately so they don't skew timing.
    let mut pairs = 0usize;
    let mut survivors = 0usize;
    for candidate in &candidates {
        let bbox = candidate.aabb(settings.unit_size);
        for other in placed.iter() {
            pairs += 1;
            if aabb_overlaps(&bbox, &other.aabb(settings.unit_size)) {
                survivors += 1;
            }
        }
    }
    let culled = if pairs == 0 { 0.0 } else { 100.0 * (pairs - survivors) as f64 / pairs as f64 };
    let secs = elapsed.as_secs_f64().max(f64::EPSILON);

    println!();
    println!("═══════════════════════════════════════════════");
    println!("  COLLISION BENCHMARK");
    println!("═══════════════════════════════════════════════");
    println!("  Placed shapes: {}", placed.len());
    println!("  Queries: {}", candidates.len());
    println!("  Colliding: {} ({:.1}%)", hits, 100.0 * hits as f64 / candidates.len().max(1) as f64);
    println!("  Time: {:?}", elapsed);
    println!("  Queries/sec: {:.0}", candidates.len() as f64 / secs);
    println!("  Pairs culled by AABB: {:.1}%", culled);
    println!("═══════════════════════════════════════════════");

    Ok(())
}
