//! Error type for shape-scatter.
//!
//! Only inputs can fail: shape data, pools and canvas parameters. Once a
//! fill is running nothing is fatal; an abandoned placement is an outcome,
//! not an error (see [`crate::placement::Placement`]).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScatterError {
    #[error("shape file line {line}: {message}")]
    ShapeParse { line: usize, message: String },

    #[error("shape '{name}' has {vertices} vertices, need at least 3")]
    DegenerateTemplate { name: String, vertices: usize },

    #[error("shape '{name}' reaches {reach} units from its centre, culling box allows {limit}")]
    TemplateTooLarge { name: String, reach: f64, limit: f64 },

    #[error("{0} pool is empty")]
    EmptyPool(&'static str),

    #[error("stretch factor must be positive, got {0}")]
    InvalidStretch(u32),

    #[error("canvas range is empty (width {width}, height {height}, span {span}, step {step})")]
    EmptyCanvasRange {
        width: f64,
        height: f64,
        span: f64,
        step: u32,
    },

    #[error("SVG parse error: {0}")]
    Svg(String),

    #[error("no usable shapes found in {0}")]
    NoShapes(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ScatterError>;
