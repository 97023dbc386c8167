//! CLI command implementations.
//!
//! This module contains the implementations for the CLI subcommands:
//! - `fill` - Scatter shapes across a canvas for a fixed duration
//! - `shapes` - List the shape pool a scene would draw from
//! - `bench` - Time collision queries against a filled canvas
//! - `example-config` - Print an annotated scene file

pub mod common;
pub mod config;
pub mod fill;
pub mod render;
pub mod report;
pub mod shapes;
pub mod benchmark;

pub use config::print_example;
pub use fill::{cmd_fill, FillArgs};
pub use shapes::{cmd_shapes, ShapesArgs};
pub use benchmark::{cmd_benchmark, BenchArgs};
