//! CLI for replaying a runner trajectory against the ghosts

use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Parser;
use pacman_lab::{GhostConfig, Grid, Simulation, SimulationReport, Trajectory};
use serde::{Deserialize, Serialize};

/// Replay a recorded runner trajectory and report whether the ghosts catch it
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file holding `{"grid": [[0, 1, ...], ...]}`
    #[arg(long)]
    grid_file: PathBuf,

    /// Ghosts as a JSON list of `{"type", "algorithm", "startPos"}`
    #[arg(long, default_value = r#"[{"type": "blinky"}]"#)]
    ghost_configs: String,

    /// Display the replay on the terminal
    #[arg(short, long)]
    playback: bool,

    /// Playback frame length in milliseconds
    #[arg(short, long, default_value_t = 300)]
    frame_length: u64,

    /// File, where to read the trajectory. Use `-` for stdin.
    trajectory: PathBuf,
}

#[derive(Deserialize)]
struct GridFile {
    grid: Grid,
}

#[derive(Serialize)]
struct Output<'a> {
    success: bool,
    #[serde(flatten)]
    report: &'a SimulationReport,
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.to_str() == Some("-") {
        let mut buf = String::new();
        io::stdin()
            .lock()
            .read_to_string(&mut buf)
            .context("Could not read stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(path).with_context(|| format!("Could not read {}", path.display()))
    }
}

/// Read grid, ghosts and trajectory, print the outcome
fn main() -> anyhow::Result<()> {
    pacman_lab::init_tracing();
    let args = Args::parse();

    let GridFile { grid } = serde_json::from_str(&read_input(&args.grid_file)?)
        .with_context(|| format!("Invalid grid in {}", args.grid_file.display()))?;
    let configs: Vec<GhostConfig> =
        serde_json::from_str(&args.ghost_configs).context("Invalid ghost configs")?;
    let trajectory: Trajectory =
        serde_json::from_str(&read_input(&args.trajectory)?).context("Invalid trajectory")?;

    let mut sim = Simulation::new(&grid, &configs);
    let report = sim
        .simulate(&trajectory.moves)
        .context("Could not replay trajectory")?;

    if args.playback {
        sim.playback(&report, args.frame_length);
    } else {
        let output = Output {
            success: true,
            report: &report,
        };
        println!("{}", serde_json::to_string(&output)?);
    }
    Ok(())
}
