mod cli;
mod commands;
mod config;
mod report;

use clap::Parser;
use config::{CliOverrides, ResolvedConfig};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pixelframe=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    match cli.command {
        cli::Command::Init { force } => {
            commands::init(force)?;
        }
        cli::Command::Diff {
            reference,
            current,
            output,
            threshold,
            side_by_side,
        } => {
            let config = ResolvedConfig::new(CliOverrides { threshold })?;
            let code = commands::diff(
                &config,
                &reference,
                &current,
                &output,
                side_by_side.as_deref(),
            )?;
            std::process::exit(code);
        }
        cli::Command::Composite {
            images,
            labels,
            output,
        } => {
            let config = ResolvedConfig::new(CliOverrides::default())?;
            commands::composite(&config, &images, &labels, &output)?;
        }
        cli::Command::Compare {
            baseline,
            current,
            threshold,
            json,
        } => {
            let config = ResolvedConfig::new(CliOverrides { threshold })?;
            let code = commands::compare(&config, &baseline, &current, json)?;
            std::process::exit(code);
        }
        cli::Command::Grid { run, output } => {
            let config = ResolvedConfig::new(CliOverrides::default())?;
            commands::grid(&config, &run, output.as_deref())?;
        }
    }

    Ok(())
}
