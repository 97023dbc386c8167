//! List the shape pool a scene would use.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use shape_scatter::bounding_box;

use super::common::load_shape_pool;
use super::config::{SceneConfig, ShapeSources};

#[derive(Debug, Args)]
pub struct ShapesArgs {
    /// Scene YAML file to read shape sources from
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Shape file with `name: ((x, y), ...)` lines
    #[arg(long, alias = "file")]
    pub shape_file: Option<PathBuf>,

    /// SVG file whose paths become shapes
    #[arg(long, alias = "svg")]
    pub svg_shapes: Option<PathBuf>,
}

/// Execute the shapes command.
pub fn cmd_shapes(args: &ShapesArgs) -> Result<()> {
    let mut sources = match &args.config {
        Some(path) => SceneConfig::load(path)?.shapes,
        None => ShapeSources::default(),
    };
    if args.shape_file.is_some() {
        sources.file = args.shape_file.clone();
    }
    if args.svg_shapes.is_some() {
        sources.svg = args.svg_shapes.clone();
    }

    let pool = load_shape_pool(&sources)?;

    println!("{:<16} {:>8} {:>14}", "shape", "vertices", "extent");
    for template in &pool {
        let extent = bounding_box(template.vertices())
            .map(|b| format!("{:.1} x {:.1}", b.width(), b.height()))
            .unwrap_or_else(|| "-".to_string());
        println!("{:<16} {:>8} {:>14}", template.name(), template.vertices().len(), extent);
    }
    Ok(())
}
