use anyhow::{Context, Result};

use pixelframe::composite::LayoutConfig;

use super::{Breakpoint, Config, load, validate_threshold};

const THRESHOLD_ENV: &str = "PIXELFRAME_DIFF_THRESHOLD";

/// Values extracted from the CLI that participate in the merge.
#[derive(Default)]
pub struct CliOverrides {
    pub threshold: Option<f64>,
}

/// Fully resolved config after CLI > env > file > defaults merge.
pub struct ResolvedConfig {
    pub diff_threshold: f64,
    pub layout: LayoutConfig,
    pub breakpoints: Vec<Breakpoint>,
}

impl ResolvedConfig {
    pub fn new(cli: CliOverrides) -> Result<Self> {
        // 1. File layer (defaults when absent)
        let file_config = load()?;

        // 2. Env layer
        let env_threshold: Option<f64> = std::env::var(THRESHOLD_ENV)
            .ok()
            .map(|v| v.parse::<f64>())
            .transpose()
            .with_context(|| format!("{THRESHOLD_ENV} must be a valid float"))?;

        Self::merge(file_config, env_threshold, cli)
    }

    /// CLI > env > file (highest priority first).
    fn merge(file: Config, env_threshold: Option<f64>, cli: CliOverrides) -> Result<Self> {
        let diff_threshold = cli
            .threshold
            .or(env_threshold)
            .unwrap_or(file.diff.threshold);
        validate_threshold(diff_threshold).map_err(|e| anyhow::anyhow!("{e}"))?;

        Ok(Self {
            diff_threshold,
            layout: file.composite,
            breakpoints: file.breakpoints,
        })
    }
}
