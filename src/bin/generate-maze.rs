//! CLI for maze generation

use clap::Parser;
use pacman_lab::{GeneratorAlgorithm, Grid, MazeConfig, MazeGenerator, Tunnels};
use serde::Serialize;

/// Generate a playable maze grid
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze width in cells, 3 to 50
    width: usize,

    /// Maze height in cells, 3 to 50
    height: usize,

    /// Spanning tree algorithm
    #[arg(short, long, value_enum, default_value_t)]
    algorithm: GeneratorAlgorithm,

    /// Share of the remaining walls to remove, 0-1 or 0-100
    #[arg(short, long, default_value_t = 0.0)]
    imperfection: f64,

    /// Number of left-right tunnels
    #[arg(long, default_value_t = 1)]
    tunnels_h: usize,

    /// Number of top-bottom tunnels
    #[arg(long, default_value_t = 0)]
    tunnels_v: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print the grid as emojis instead of JSON
    #[arg(long)]
    emojis: bool,
}

#[derive(Serialize)]
struct Output<'a> {
    success: bool,
    grid: &'a Grid,
    width: usize,
    height: usize,
    algorithm: GeneratorAlgorithm,
    imperfection: f64,
    tunnels: &'a Tunnels,
}

/// Generate maze, print output
fn main() -> anyhow::Result<()> {
    pacman_lab::init_tracing();
    let args = Args::parse();

    let mut gen = MazeGenerator::new(args.seed);
    let built = gen.build(&MazeConfig {
        width: args.width,
        height: args.height,
        algorithm: args.algorithm,
        imperfection: args.imperfection,
        tunnels_h: args.tunnels_h,
        tunnels_v: args.tunnels_v,
    })?;

    if args.emojis {
        println!("{}", built.grid);
    } else {
        let output = Output {
            success: true,
            grid: &built.grid,
            width: args.width,
            height: args.height,
            algorithm: args.algorithm,
            imperfection: args.imperfection,
            tunnels: &built.tunnels,
        };
        println!("{}", serde_json::to_string(&output)?);
    }
    Ok(())
}
