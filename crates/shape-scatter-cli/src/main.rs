//! shape-scatter - fill a canvas with non-overlapping polygons
//!
//! Usage:
//!   shape-scatter fill [-c scene.yaml] [-o out.svg]   Scatter shapes for a fixed duration
//!   shape-scatter shapes [--shape-file f.txt]        List the shape pool
//!   shape-scatter bench [-n 100000]                  Benchmark collision queries
//!   shape-scatter example-config                     Print an annotated scene file
//!
//! Logging goes to stderr; set `RUST_LOG=debug` for per-placement detail.

mod cli;

use clap::{Parser, Subcommand};
use env_logger::{Builder, Env};

use cli::{cmd_benchmark, cmd_fill, cmd_shapes, print_example, BenchArgs, FillArgs, ShapesArgs};

#[derive(Debug, Parser)]
#[command(name = "shape-scatter", version, about = "Fill a canvas with non-overlapping polygons")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Scatter shapes across the canvas until the time budget runs out
    Fill(FillArgs),
    /// List the shapes a scene would draw from
    Shapes(ShapesArgs),
    /// Time collision queries against a filled canvas
    Bench(BenchArgs),
    /// Print an annotated example scene file
    ExampleConfig,
}

fn main() {
    Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = match &cli.command {
        Command::Fill(args) => cmd_fill(args),
        Command::Shapes(args) => cmd_shapes(args),
        Command::Bench(args) => cmd_benchmark(args),
        Command::ExampleConfig => {
            print_example();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
