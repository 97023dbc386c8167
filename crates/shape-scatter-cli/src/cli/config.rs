//! Scene configuration.
//!
//! A scene is described by an optional YAML file; command-line flags are
//! layered on top. Every field has a default, so an empty file (or no file)
//! is a valid scene.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use shape_scatter::{DEFAULT_SPAN, DEFAULT_STEP, DEFAULT_UNIT_SIZE};

pub const MIN_STRETCH: u32 = 1;
pub const MAX_STRETCH: u32 = 10;
pub const MIN_DURATION: u64 = 5;
pub const MAX_DURATION: u64 = 30;
pub const MIN_SEED: u64 = 1;
pub const MAX_SEED: u64 = 99;

/// Palette used when the scene names none.
pub const DEFAULT_COLORS: &[&str] = &["green", "blue", "yellow", "orange", "purple", "pink", "brown"];

/// A complete scene description.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Run label, printed in the report
    pub label: String,

    pub canvas: CanvasConfig,

    /// Uniform stretch applied to every shape
    pub stretch: u32,

    /// Random seed
    pub seed: u64,

    /// Fill duration in seconds
    pub duration: u64,

    /// Colour pool
    pub colors: Vec<String>,

    /// Shape pool sources
    pub shapes: ShapeSources,

    /// World size of a template at stretch 1
    pub unit_size: f64,

    /// Reject shapes whose box touches or crosses the canvas edge
    pub within_canvas: bool,
}

/// Canvas size and position grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CanvasConfig {
    pub width: f64,
    pub height: f64,

    /// Fraction of the canvas that positions are drawn from
    pub span: f64,

    /// Grid step between candidate positions
    pub step: u32,

    pub background: String,
}

/// Where shape templates come from. Sources are combined; with none given
/// the built-in set is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShapeSources {
    /// Built-in template names
    pub builtin: Vec<String>,

    /// Shape file (`name: ((x, y), ...)` per line)
    pub file: Option<PathBuf>,

    /// SVG whose paths become templates
    pub svg: Option<PathBuf>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            label: "shape-scatter".to_string(),
            canvas: CanvasConfig::default(),
            stretch: 1,
            seed: 1,
            duration: 5,
            colors: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
            shapes: ShapeSources::default(),
            unit_size: DEFAULT_UNIT_SIZE,
            within_canvas: false,
        }
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        // 0.7 of a 1920x1080 screen
        Self {
            width: 1344.0,
            height: 756.0,
            span: DEFAULT_SPAN,
            step: DEFAULT_STEP,
            background: "black".to_string(),
        }
    }
}

impl ShapeSources {
    pub fn is_empty(&self) -> bool {
        self.builtin.is_empty() && self.file.is_none() && self.svg.is_none()
    }
}

impl SceneConfig {
    /// Load a scene from a YAML file.
    ///
    /// Relative shape paths are resolved against the file's directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read scene file {}", path.display()))?;

        let mut config: SceneConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse scene YAML {}", path.display()))?;

        if let Some(dir) = path.parent() {
            config.shapes.file = config.shapes.file.map(|f| resolve(dir, f));
            config.shapes.svg = config.shapes.svg.map(|f| resolve(dir, f));
        }
        Ok(config)
    }

    /// Check ranges before a run starts.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_STRETCH..=MAX_STRETCH).contains(&self.stretch) {
            bail!("stretch {} out of range {} - {}", self.stretch, MIN_STRETCH, MAX_STRETCH);
        }
        if !(MIN_SEED..=MAX_SEED).contains(&self.seed) {
            bail!("seed {} out of range {} - {}", self.seed, MIN_SEED, MAX_SEED);
        }
        if !(MIN_DURATION..=MAX_DURATION).contains(&self.duration) {
            bail!("duration {}s out of range {} - {}", self.duration, MIN_DURATION, MAX_DURATION);
        }
        if self.colors.is_empty() {
            bail!("colour pool is empty");
        }
        if !(self.canvas.width > 0.0 && self.canvas.height > 0.0) {
            bail!("canvas must have positive size, got {} x {}", self.canvas.width, self.canvas.height);
        }
        if !(self.canvas.span > 0.0 && self.canvas.span <= 1.0) {
            bail!("canvas span must be in (0, 1], got {}", self.canvas.span);
        }
        if self.canvas.step == 0 {
            bail!("canvas step must be at least 1");
        }
        if !(self.unit_size > 0.0 && self.unit_size.is_finite()) {
            bail!("unit size must be positive, got {}", self.unit_size);
        }
        Ok(())
    }
}

fn resolve(dir: &Path, file: PathBuf) -> PathBuf {
    if file.is_absolute() { file } else { dir.join(file) }
}

pub fn print_example() {
    println!(r##"# Example shape-scatter scene
label: "demo"

canvas:
  width: 1344       # world units, origin at the centre
  height: 756
  span: 0.8         # positions are drawn from the inner 80%
  step: 10          # grid step between candidate positions
  background: "black"

stretch: 2          # 1 - 10
seed: 42            # 1 - 99
duration: 5         # seconds, 5 - 30
unit_size: 20       # size of a stretch-1 shape
within_canvas: false

colors: [green, blue, yellow, orange, purple, pink, brown]

shapes:
  builtin: [square, triangle, hexagon]
  # file: shapes.txt
  # svg: outlines.svg
"##);
}
