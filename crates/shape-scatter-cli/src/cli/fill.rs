//! Fill command implementation.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::Args;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use shape_scatter::{canvas_bounds, fill, CanvasRange, CollisionSettings, FillRequest, SystemClock};

use super::common::load_shape_pool;
use super::config::SceneConfig;
use super::render::{scene_to_svg, write_png};
use super::report::RunReport;

#[derive(Debug, Args)]
pub struct FillArgs {
    /// Scene YAML file; flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output SVG file ("-" for stdout)
    #[arg(short, long, default_value = "scatter.svg")]
    pub output: String,

    /// Also write a PNG rendering
    #[arg(long)]
    pub png: Option<PathBuf>,

    /// PNG pixels per world unit
    #[arg(long, default_value_t = 1.0)]
    pub png_scale: f64,

    /// Print the report as JSON, including every placement
    #[arg(long)]
    pub json: bool,

    /// Re-check the final placement pairwise and fail on any collision
    #[arg(long)]
    pub verify: bool,

    #[arg(long)]
    pub label: Option<String>,

    #[arg(short = 'W', long)]
    pub width: Option<f64>,

    #[arg(short = 'H', long)]
    pub height: Option<f64>,

    #[arg(long)]
    pub span: Option<f64>,

    #[arg(long)]
    pub step: Option<u32>,

    #[arg(long)]
    pub background: Option<String>,

    /// Stretch factor (1 - 10)
    #[arg(short, long)]
    pub stretch: Option<u32>,

    /// Random seed (1 - 99)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Duration in seconds (5 - 30)
    #[arg(short, long)]
    pub duration: Option<u64>,

    /// Comma-separated colour pool
    #[arg(long, value_delimiter = ',')]
    pub colors: Option<Vec<String>>,

    /// Comma-separated built-in shape names
    #[arg(long, value_delimiter = ',')]
    pub shapes: Option<Vec<String>>,

    /// Shape file with `name: ((x, y), ...)` lines
    #[arg(long)]
    pub shape_file: Option<PathBuf>,

    /// SVG file whose paths become shapes
    #[arg(long)]
    pub svg_shapes: Option<PathBuf>,

    #[arg(long)]
    pub unit_size: Option<f64>,

    /// Keep every shape strictly inside the canvas
    #[arg(long)]
    pub within_canvas: bool,
}

impl FillArgs {
    /// Layer flags over the scene file (or the defaults).
    pub fn scene(&self) -> Result<SceneConfig> {
        let mut config = match &self.config {
            Some(path) => SceneConfig::load(path)?,
            None => SceneConfig::default(),
        };

        if let Some(label) = &self.label {
            config.label = label.clone();
        }
        if let Some(width) = self.width {
            config.canvas.width = width;
        }
        if let Some(height) = self.height {
            config.canvas.height = height;
        }
        if let Some(span) = self.span {
            config.canvas.span = span;
        }
        if let Some(step) = self.step {
            config.canvas.step = step;
        }
        if let Some(background) = &self.background {
            config.canvas.background = background.clone();
        }
        if let Some(stretch) = self.stretch {
            config.stretch = stretch;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(duration) = self.duration {
            config.duration = duration;
        }
        if let Some(colors) = &self.colors {
            config.colors = colors.iter().map(|c| c.trim().to_string()).filter(|c| !c.is_empty()).collect();
        }
        if let Some(shapes) = &self.shapes {
            config.shapes.builtin = shapes.iter().map(|s| s.trim().to_string()).collect();
        }
        if let Some(file) = &self.shape_file {
            config.shapes.file = Some(file.clone());
        }
        if let Some(svg) = &self.svg_shapes {
            config.shapes.svg = Some(svg.clone());
        }
        if let Some(unit_size) = self.unit_size {
            config.unit_size = unit_size;
        }
        if self.within_canvas {
            config.within_canvas = true;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Execute the fill command.
pub fn cmd_fill(args: &FillArgs) -> Result<()> {
    let scene = args.scene()?;
    let shapes = load_shape_pool(&scene.shapes)?;

    let range = CanvasRange::new(scene.canvas.width, scene.canvas.height, scene.canvas.span, scene.canvas.step)?;
    let settings = CollisionSettings {
        unit_size: scene.unit_size,
        bounds: scene
            .within_canvas
            .then(|| canvas_bounds(scene.canvas.width, scene.canvas.height)),
    };
    let request = FillRequest {
        shapes: &shapes,
        colors: &scene.colors,
        stretch: scene.stretch,
        duration: Duration::from_secs(scene.duration),
    };

    info!(
        "scene '{}': {}x{} canvas, seed {}, shapes [{}]",
        scene.label,
        scene.canvas.width,
        scene.canvas.height,
        scene.seed,
        shapes.iter().map(|s| s.name()).collect::<Vec<_>>().join(", ")
    );

    let mut rng = StdRng::seed_from_u64(scene.seed);
    let wall_start = Local::now();
    let outcome = fill(&request, range, settings, &mut rng, &SystemClock)?;
    let wall_end = Local::now();

    if args.verify {
        if let Some((i, j)) = outcome.placed.find_collision_pair() {
            bail!("verification failed: shapes {} and {} collide", i, j);
        }
        info!("verified {} shapes pairwise", outcome.placed.len());
    }

    let svg = scene_to_svg(&outcome.placed, &scene.canvas, &scene.label);
    if args.output == "-" {
        print!("{}", svg);
    } else {
        fs::write(&args.output, &svg).with_context(|| format!("failed to write {}", args.output))?;
        info!("wrote {}", args.output);
    }

    if let Some(png_path) = &args.png {
        if args.png_scale <= 0.0 {
            warn!("ignoring --png-scale {}, using 1.0", args.png_scale);
        }
        let scale = if args.png_scale > 0.0 { args.png_scale } else { 1.0 };
        write_png(&svg, png_path, scale, &scene.canvas)?;
    }

    let report = RunReport::new(
        &scene.label,
        wall_start,
        wall_end,
        &outcome.summary,
        scene.seed,
        scene.stretch,
        scene.duration,
    );

    if args.json {
        let report = report.with_placements(&outcome.placed);
        let json = serde_json::to_string_pretty(&report)?;
        if args.output == "-" {
            eprintln!("{}", json);
        } else {
            println!("{}", json);
        }
    } else {
        eprintln!("{}", report.title());
        if args.output == "-" {
            eprintln!("{}", report.summary_line());
        } else {
            println!("{}", report.summary_line());
        }
    }

    Ok(())
}
