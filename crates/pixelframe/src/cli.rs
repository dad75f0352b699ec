use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config;

fn parse_threshold(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("{e}"))?;
    config::validate_threshold(v)
}

#[derive(Parser)]
#[command(
    name = "pixelframe",
    about = "Pixel diffs and composite grids for responsive screenshots"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create pixelframe.toml with default settings
    Init {
        /// Overwrite an existing config
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Diff two images and write a highlighted diff (exit 0/1)
    Diff {
        /// Reference (baseline) image
        reference: PathBuf,
        /// Current image
        current: PathBuf,
        /// Where to write the diff image
        #[arg(long, short = 'o', default_value = "diff.png")]
        output: PathBuf,
        /// Min similarity percentage (0.0–100.0) for a pass
        #[arg(long, value_parser = parse_threshold)]
        threshold: Option<f64>,
        /// Also write a reference | current | diff strip to this path
        #[arg(long)]
        side_by_side: Option<PathBuf>,
    },

    /// Compose images into one labeled grid
    Composite {
        /// Images, in grid order
        #[arg(required = true)]
        images: Vec<PathBuf>,
        /// Caption for the image at the same position (repeatable)
        #[arg(long = "label", short = 'l')]
        labels: Vec<String>,
        /// Where to write the composite
        #[arg(long, short = 'o', default_value = "composite.png")]
        output: PathBuf,
    },

    /// Diff every configured breakpoint of two capture runs (exit 0/1)
    Compare {
        /// Baseline run directory
        baseline: PathBuf,
        /// Current run directory; diffs are written under its diff/
        current: PathBuf,
        /// Min similarity percentage (0.0–100.0) for a pass
        #[arg(long, value_parser = parse_threshold)]
        threshold: Option<f64>,
        /// Print results as JSON instead of colored lines
        #[arg(long)]
        json: bool,
    },

    /// Compose a run's breakpoint screenshots into one grid
    Grid {
        /// Run directory
        run: PathBuf,
        /// Output path (default: <run>/composite/composite.png)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
}
