//! End-to-end properties of the collision engine and the fill loop.
//!
//! Time is driven by `ManualClock`, so every run here is reproducible.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use shape_scatter::{
    aabb_overlaps, attempt_place, builtins, canvas_bounds, fill, is_colliding_with_any, parse_shape_file,
    polygons_collide, transform_vertices, Aabb, CanvasRange, CollisionSettings, FillRequest, ManualClock,
    PlacedShape, Placement, PlacementContext, Point, Scale, ShapeTemplate,
};

fn square_template() -> Arc<ShapeTemplate> {
    // Half-width 1, so "size 2x2" at scale 1.
    Arc::new(
        ShapeTemplate::new(
            "unit",
            vec![
                Point::new(-1.0, -1.0),
                Point::new(1.0, -1.0),
                Point::new(1.0, 1.0),
                Point::new(-1.0, 1.0),
            ],
        )
        .unwrap(),
    )
}

fn world_square(x: f64, y: f64, scale: f64) -> Vec<Point> {
    transform_vertices(square_template().vertices(), Point::new(x, y), Scale::uniform(scale))
}

fn pools() -> (Vec<Arc<ShapeTemplate>>, Vec<String>) {
    let shapes = builtins().into_iter().map(Arc::new).collect();
    let colors = ["green", "blue", "yellow", "orange", "purple", "pink", "brown"]
        .iter()
        .map(|c| c.to_string())
        .collect();
    (shapes, colors)
}

/// Raw SAT over every pair, independent of the culling boxes.
fn assert_pairwise_clear(placed: &[PlacedShape], context: &str) {
    for i in 0..placed.len() {
        for j in (i + 1)..placed.len() {
            assert!(
                !polygons_collide(placed[i].world_vertices(), placed[j].world_vertices()),
                "{}: shapes {} and {} collide",
                context,
                i,
                j
            );
        }
    }
}

#[test]
fn aabb_examples() {
    let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
    assert!(aabb_overlaps(&a, &Aabb::new(10.0, 0.0, 20.0, 10.0)));
    assert!(!aabb_overlaps(&a, &Aabb::new(11.0, 0.0, 20.0, 10.0)));
}

#[test]
fn sat_examples() {
    assert!(polygons_collide(&world_square(0.0, 0.0, 1.0), &world_square(1.0, 0.0, 1.0)));
    assert!(!polygons_collide(&world_square(0.0, 0.0, 1.0), &world_square(10.0, 0.0, 1.0)));
    // Side 2 inside side 10.
    assert!(polygons_collide(&world_square(0.0, 0.0, 1.0), &world_square(0.0, 0.0, 5.0)));
}

#[test]
fn empty_placed_set_never_collides() {
    let (shapes, _) = pools();
    let empty: Vec<PlacedShape> = Vec::new();
    for template in &shapes {
        for stretch in [1.0, 3.0, 10.0] {
            let candidate = PlacedShape::new(Arc::clone(template), Point::new(0.0, 0.0), Scale::uniform(stretch), "x");
            assert!(!is_colliding_with_any(&candidate, &empty, &CollisionSettings::default()));
        }
    }
}

#[test]
fn fill_result_is_pairwise_clear() {
    let (shapes, colors) = pools();
    for seed in [1_u64, 17, 99] {
        let request = FillRequest {
            shapes: &shapes,
            colors: &colors,
            stretch: 2,
            duration: Duration::from_millis(300),
        };
        let range = CanvasRange::new(900.0, 600.0, 0.8, 10).unwrap();
        let clock = ManualClock::new(Duration::from_micros(20));
        let settings = CollisionSettings::default();
        let outcome = fill(&request, range, settings, &mut StdRng::seed_from_u64(seed), &clock).unwrap();

        assert!(outcome.placed.len() > 5, "seed {} placed only {}", seed, outcome.placed.len());
        assert_eq!(outcome.placed.find_collision_pair(), None, "seed {}", seed);
        assert_pairwise_clear(outcome.placed.as_slice(), &format!("seed {}", seed));
    }
}

#[test]
fn canvas_bounds_respected_when_enabled() {
    let (shapes, colors) = pools();
    let (width, height) = (400.0, 300.0);
    let bounds = canvas_bounds(width, height);
    let settings = CollisionSettings {
        bounds: Some(bounds),
        ..CollisionSettings::default()
    };
    let request = FillRequest {
        shapes: &shapes,
        colors: &colors,
        stretch: 4,
        duration: Duration::from_millis(100),
    };
    let range = CanvasRange::new(width, height, 1.0, 10).unwrap();
    let clock = ManualClock::new(Duration::from_micros(20));
    let outcome = fill(&request, range, settings, &mut StdRng::seed_from_u64(4), &clock).unwrap();

    assert!(!outcome.placed.is_empty());
    for shape in outcome.placed.iter() {
        assert!(bounds.contains_strictly(&shape.aabb(settings.unit_size)));
    }
}

#[test]
fn placement_replays_under_fixed_seed() {
    let template = square_template();
    let run = |seed: u64| {
        let clock = ManualClock::frozen();
        let range = CanvasRange::new(300.0, 300.0, 0.8, 10).unwrap();
        let mut ctx = PlacementContext::new(range, CollisionSettings::default(), clock.origin() + Duration::from_secs(3600));
        let mut rng = StdRng::seed_from_u64(seed);
        let outcomes: Vec<Placement> = (0..15)
            .map(|_| {
                let candidate = PlacedShape::new(Arc::clone(&template), Point::new(0.0, 0.0), Scale::uniform(8.0), "red");
                attempt_place(&mut ctx, candidate, &mut rng, &clock).outcome
            })
            .collect();
        outcomes
    };

    assert_eq!(run(7), run(7));
    assert_ne!(run(7), run(8));
}

#[test]
fn abandon_replays_under_fixed_seed() {
    // One large square blocks the whole grid; the second candidate must be
    // abandoned after the same number of draws every time.
    let template = square_template();
    let run = || {
        let clock = ManualClock::new(Duration::from_millis(1));
        let range = CanvasRange::new(100.0, 100.0, 0.8, 10).unwrap();
        let mut ctx = PlacementContext::new(range, CollisionSettings::default(), clock.origin() + Duration::from_millis(40));
        let mut rng = StdRng::seed_from_u64(21);
        let big = PlacedShape::new(Arc::clone(&template), Point::new(0.0, 0.0), Scale::uniform(200.0), "red");
        let first = attempt_place(&mut ctx, big, &mut rng, &clock);
        let small = PlacedShape::new(Arc::clone(&template), Point::new(0.0, 0.0), Scale::uniform(1.0), "red");
        let second = attempt_place(&mut ctx, small, &mut rng, &clock);
        (first, second, ctx.placed().len())
    };

    let (first, second, placed) = run();
    assert!(first.is_committed());
    assert_eq!(second.outcome, Placement::Abandoned);
    assert_eq!(placed, 1);
    assert_eq!(run(), (first, second, placed));
}

#[test]
fn fill_replays_under_fixed_seed_and_clock() {
    let (shapes, colors) = pools();
    let run = || {
        let request = FillRequest {
            shapes: &shapes,
            colors: &colors,
            stretch: 3,
            duration: Duration::from_millis(50),
        };
        let range = CanvasRange::new(800.0, 600.0, 0.8, 10).unwrap();
        let clock = ManualClock::new(Duration::from_micros(100));
        let outcome = fill(&request, range, CollisionSettings::default(), &mut StdRng::seed_from_u64(3), &clock).unwrap();
        outcome
            .placed
            .iter()
            .map(|s| (s.template().name().to_string(), s.color().to_string(), s.position()))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn fill_overrun_is_bounded() {
    let (shapes, colors) = pools();
    for (tick_us, duration_ms) in [(250_u64, 20_u64), (1000, 100), (5000, 30)] {
        let tick = Duration::from_micros(tick_us);
        let duration = Duration::from_millis(duration_ms);
        let request = FillRequest { shapes: &shapes, colors: &colors, stretch: 5, duration };
        let range = CanvasRange::new(500.0, 500.0, 0.8, 10).unwrap();
        let clock = ManualClock::new(tick);
        let outcome = fill(&request, range, CollisionSettings::default(), &mut StdRng::seed_from_u64(2), &clock).unwrap();
        assert!(
            outcome.summary.elapsed <= duration + tick * 3,
            "tick {:?} duration {:?} elapsed {:?}",
            tick,
            duration,
            outcome.summary.elapsed
        );
    }
}

#[test]
fn shape_file_templates_fill_cleanly() {
    let text = "\
wedge: ((-10, -10), (10, -10), (0, 10))
slab: ((-10, -4), (10, -4), (10, 4), (-10, 4))
kite: ((0, 10), (-6, 0), (0, -10), (6, 0))
";
    let shapes: Vec<Arc<ShapeTemplate>> = parse_shape_file(text).unwrap().into_iter().map(Arc::new).collect();
    let colors = vec!["black".to_string()];
    let request = FillRequest { shapes: &shapes, colors: &colors, stretch: 1, duration: Duration::from_millis(100) };
    let range = CanvasRange::new(400.0, 400.0, 0.8, 10).unwrap();
    let clock = ManualClock::new(Duration::from_micros(20));
    let outcome = fill(&request, range, CollisionSettings::default(), &mut StdRng::seed_from_u64(1), &clock).unwrap();

    assert!(outcome.placed.len() > 3);
    assert_eq!(outcome.placed.find_collision_pair(), None);
    assert_pairwise_clear(outcome.placed.as_slice(), "shape file");
}

#[test]
fn oversized_shape_file_outline_fills_cleanly() {
    let text = "big: ((-30,-30),(30,-30),(30,30),(-30,30))\n";
    let shapes: Vec<Arc<ShapeTemplate>> = parse_shape_file(text).unwrap().into_iter().map(Arc::new).collect();
    let colors = vec!["black".to_string()];
    let request = FillRequest { shapes: &shapes, colors: &colors, stretch: 1, duration: Duration::from_millis(100) };
    let range = CanvasRange::new(400.0, 400.0, 0.8, 10).unwrap();
    let clock = ManualClock::new(Duration::from_micros(20));
    let outcome = fill(&request, range, CollisionSettings::default(), &mut StdRng::seed_from_u64(1), &clock).unwrap();

    assert!(outcome.placed.len() > 3);
    assert_eq!(outcome.placed.find_collision_pair(), None);
    assert_pairwise_clear(outcome.placed.as_slice(), "oversized outline");
}
