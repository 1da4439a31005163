//! CLI for pellet placement

use std::{fs, path::PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use pacman_lab::{Grid, PelletPlacer, Tile};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum PelletAlgorithm {
    Random,
    #[default]
    Strategic,
    Classic,
}

/// Place pellets and power pellets on a maze grid
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file holding `{"grid": [[0, 1, ...], ...]}`
    #[arg(long, conflicts_with = "grid_json")]
    grid_file: Option<PathBuf>,

    /// Grid as a JSON matrix
    #[arg(long)]
    grid_json: Option<String>,

    /// Placement strategy
    #[arg(short, long, value_enum, default_value_t)]
    algorithm: PelletAlgorithm,

    /// Pellet density for the random strategy
    #[arg(long, default_value_t = PelletPlacer::DEFAULT_DENSITY)]
    density: f64,

    /// Pellet density in corridors for the strategic strategy
    #[arg(long, default_value_t = PelletPlacer::DEFAULT_CORRIDOR_DENSITY)]
    corridor_density: f64,

    /// Pellet density at junctions for the strategic strategy
    #[arg(long, default_value_t = PelletPlacer::DEFAULT_JUNCTION_DENSITY)]
    junction_density: f64,

    /// Number of power pellets
    #[arg(long, default_value_t = PelletPlacer::DEFAULT_POWER_PELLETS)]
    power_pellets: usize,

    /// Pellet-free radius around power pellets for the classic strategy
    #[arg(long, default_value_t = PelletPlacer::DEFAULT_CLEARANCE)]
    clearance: u32,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Deserialize)]
struct GridFile {
    grid: Grid,
}

#[derive(Serialize)]
struct Output {
    success: bool,
    grid: Vec<Vec<Tile>>,
    algorithm: PelletAlgorithm,
}

/// Read grid, print it with pellets
fn main() -> anyhow::Result<()> {
    pacman_lab::init_tracing();
    let args = Args::parse();

    let grid: Grid = match (&args.grid_file, &args.grid_json) {
        (Some(path), _) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Could not read {}", path.display()))?;
            let file: GridFile = serde_json::from_str(&text)
                .with_context(|| format!("Invalid grid in {}", path.display()))?;
            file.grid
        }
        (None, Some(json)) => serde_json::from_str(json).context("Invalid grid JSON")?,
        (None, None) => bail!("Either --grid-file or --grid-json is required"),
    };

    let placer = match args.algorithm {
        PelletAlgorithm::Random => PelletPlacer::random(args.density),
        PelletAlgorithm::Strategic => {
            PelletPlacer::strategic(args.corridor_density, args.junction_density)
        }
        PelletAlgorithm::Classic => PelletPlacer::classic(args.clearance),
    }
    .with_power_pellets(args.power_pellets);

    let mut rng = match args.seed {
        Some(state) => StdRng::seed_from_u64(state),
        None => StdRng::from_entropy(),
    };
    let output = Output {
        success: true,
        grid: placer.place(&grid, &mut rng),
        algorithm: args.algorithm,
    };
    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}
