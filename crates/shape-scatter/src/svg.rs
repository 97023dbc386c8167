//! Shape templates from SVG files.
//!
//! Uses usvg for complete SVG resolution (CSS, transforms, etc.)
//! then walks the tree and turns each path into a template outline.
//!
//! ## Curve Flattening
//!
//! Curved outlines (circles, ellipses, Bézier paths) are flattened with
//! lyon_geom. The flattened outline is then recentred on its bounding-box
//! centre and scaled so its larger half extent is 10 units, which puts it in
//! the same 20x20 frame as the built-in templates.

use lyon_geom::{point, CubicBezierSegment, QuadraticBezierSegment};

use crate::error::{Result, ScatterError};
use crate::geometry::{bounding_box, Point};
use crate::shape::{ShapeTemplate, TEMPLATE_HALF_EXTENT};

/// Tolerance for curve flattening, in source SVG units.
const CURVE_TOLERANCE: f32 = 0.1;

/// Extract one template per path element.
///
/// Only the first subpath of each path is used. SVG is y-down, so outlines
/// are flipped into the y-up world frame.
pub fn templates_from_svg(svg_content: &str) -> Result<Vec<ShapeTemplate>> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg_content, &options).map_err(|e| ScatterError::Svg(e.to_string()))?;

    let mut outlines = Vec::new();
    collect_from_group(tree.root(), &mut outlines);

    let templates: Vec<ShapeTemplate> = outlines
        .into_iter()
        .enumerate()
        .filter_map(|(index, (id, points))| {
            let name = if id.is_empty() { format!("svg-{}", index + 1) } else { id };
            let normalized = normalize_outline(&points)?;
            ShapeTemplate::new(name, normalized).ok()
        })
        .collect();

    if templates.is_empty() {
        Err(ScatterError::NoShapes("SVG document".to_string()))
    } else {
        Ok(templates)
    }
}

fn collect_from_group(group: &usvg::Group, outlines: &mut Vec<(String, Vec<Point>)>) {
    for child in group.children() {
        match child {
            usvg::Node::Group(group) => collect_from_group(group, outlines),
            usvg::Node::Path(path) => {
                if let Some(points) = path_outline(path) {
                    outlines.push((path.id().to_string(), points));
                }
            }
            // Text, images etc. carry no outline.
            _ => {}
        }
    }
}

/// Flatten the first subpath of a usvg path into absolute points.
fn path_outline(path: &usvg::Path) -> Option<Vec<Point>> {
    use usvg::tiny_skia_path::PathSegment;

    let mut points = Vec::new();
    let mut last: Option<(f32, f32)> = None;

    for segment in path.data().segments() {
        match segment {
            PathSegment::MoveTo(p) => {
                if !points.is_empty() {
                    break;
                }
                points.push(Point::new(p.x as f64, p.y as f64));
                last = Some((p.x, p.y));
            }
            PathSegment::LineTo(p) => {
                points.push(Point::new(p.x as f64, p.y as f64));
                last = Some((p.x, p.y));
            }
            PathSegment::QuadTo(ctrl, p) => {
                if let Some((lx, ly)) = last {
                    let curve = QuadraticBezierSegment {
                        from: point(lx, ly),
                        ctrl: point(ctrl.x, ctrl.y),
                        to: point(p.x, p.y),
                    };
                    curve.for_each_flattened(CURVE_TOLERANCE, &mut |segment| {
                        points.push(Point::new(segment.to.x as f64, segment.to.y as f64));
                    });
                } else {
                    points.push(Point::new(p.x as f64, p.y as f64));
                }
                last = Some((p.x, p.y));
            }
            PathSegment::CubicTo(ctrl1, ctrl2, p) => {
                if let Some((lx, ly)) = last {
                    let curve = CubicBezierSegment {
                        from: point(lx, ly),
                        ctrl1: point(ctrl1.x, ctrl1.y),
                        ctrl2: point(ctrl2.x, ctrl2.y),
                        to: point(p.x, p.y),
                    };
                    curve.for_each_flattened(CURVE_TOLERANCE, &mut |segment| {
                        points.push(Point::new(segment.to.x as f64, segment.to.y as f64));
                    });
                } else {
                    points.push(Point::new(p.x as f64, p.y as f64));
                }
                last = Some((p.x, p.y));
            }
            PathSegment::Close => {}
        }
    }

    points.dedup_by(|a, b| (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6);
    // A closed path may repeat its first point at the end.
    if points.len() > 1 {
        let first = points[0];
        if let Some(last) = points.last() {
            if (last.x - first.x).abs() < 1e-6 && (last.y - first.y).abs() < 1e-6 {
                points.pop();
            }
        }
    }

    (points.len() >= 3).then_some(points)
}

/// Recentre on the bounding-box centre, flip y, and fit the 20x20 frame.
fn normalize_outline(points: &[Point]) -> Option<Vec<Point>> {
    let bbox = bounding_box(points)?;
    let half = bbox.width().max(bbox.height()) / 2.0;
    if half <= 0.0 {
        return None;
    }
    let cx = (bbox.min_x + bbox.max_x) / 2.0;
    let cy = (bbox.min_y + bbox.max_y) / 2.0;
    let k = TEMPLATE_HALF_EXTENT / half;

    Some(points.iter().map(|p| Point::new((p.x - cx) * k, -(p.y - cy) * k)).collect())
}

// ============================================================================
// TESTS
// ============================================================================
