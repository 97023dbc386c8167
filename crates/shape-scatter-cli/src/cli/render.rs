//! SVG and PNG output for a finished scene.
//!
//! World space is y-up with the origin at the canvas centre; the SVG gets a
//! centred viewBox and a `scale(1,-1)` group so shapes keep their
//! orientation.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use log::info;
use resvg::usvg;
use tiny_skia::Pixmap;

use shape_scatter::PlacedSet;

use super::config::CanvasConfig;

/// Render the placed set as a standalone SVG document.
pub fn scene_to_svg(placed: &PlacedSet, canvas: &CanvasConfig, title: &str) -> String {
    let (w, h) = (canvas.width, canvas.height);

    let mut svg = format!(
        r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg"
     width="{w:.0}" height="{h:.0}"
     viewBox="{:.2} {:.2} {w:.2} {h:.2}">
  <title>{}</title>
  <rect x="{:.2}" y="{:.2}" width="100%" height="100%" fill="{}"/>
  <g transform="scale(1,-1)" stroke="none">
"##,
        -w / 2.0,
        -h / 2.0,
        escape(title),
        -w / 2.0,
        -h / 2.0,
        escape(&canvas.background),
    );

    for shape in placed.iter() {
        let vertices = shape.world_vertices();
        if vertices.len() < 3 {
            continue;
        }
        let points = vertices
            .iter()
            .map(|p| format!("{:.2},{:.2}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");
        // Writing to a String cannot fail.
        let _ = writeln!(
            svg,
            r#"    <polygon data-shape="{}" fill="{}" points="{}"/>"#,
            escape(shape.template().name()),
            escape(shape.color()),
            points
        );
    }

    svg.push_str("  </g>\n</svg>\n");
    svg
}

/// Rasterise SVG content with resvg and save it as PNG.
pub fn write_png(svg_content: &str, png_path: &Path, scale: f64, canvas: &CanvasConfig) -> Result<()> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg_content, &options).context("failed to parse generated SVG")?;

    let pixmap_width = (canvas.width * scale).round() as u32;
    let pixmap_height = (canvas.height * scale).round() as u32;

    let mut pixmap = Pixmap::new(pixmap_width, pixmap_height)
        .ok_or_else(|| anyhow!("could not create {}x{} pixmap", pixmap_width, pixmap_height))?;

    let transform = tiny_skia::Transform::from_scale(scale as f32, scale as f32);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    pixmap
        .save_png(png_path)
        .with_context(|| format!("failed to write {}", png_path.display()))?;
    info!("wrote {} ({}x{})", png_path.display(), pixmap_width, pixmap_height);
    Ok(())
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
