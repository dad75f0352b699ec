use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::warn;

use pixelframe::{composite, store};

use crate::config::{Breakpoint, ResolvedConfig};

/// `pixelframe grid`: composite of every screenshot in a run.
pub fn grid(config: &ResolvedConfig, run: &Path, output: Option<&Path>) -> Result<()> {
    let available = store::list_screenshots(run);
    let (paths, labels) = grid_entries(&config.breakpoints, &available);
    if paths.is_empty() {
        bail!(
            "No screenshots found in {}",
            run.join(store::SCREENSHOTS_DIR).display()
        );
    }

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| store::composite_path(run));
    let canvas = composite::compose_files(&paths, &labels, &output, &config.layout)
        .with_context(|| format!("Failed to build composite for {}", run.display()))?;

    println!(
        "Composite written to {} ({}x{}, {} screenshot(s))",
        output.display(),
        canvas.width(),
        canvas.height(),
        paths.len()
    );
    Ok(())
}

/// Configured breakpoints first (config order, captioned with their
/// viewport), then any other screenshots by name.
fn grid_entries(
    breakpoints: &[Breakpoint],
    available: &BTreeMap<String, PathBuf>,
) -> (Vec<PathBuf>, Vec<String>) {
    let mut paths = Vec::new();
    let mut labels = Vec::new();

    for bp in breakpoints {
        if let Some(path) = available.get(&bp.name) {
            paths.push(path.clone());
            labels.push(bp.label().to_string());
        } else {
            warn!(breakpoint = %bp.name, "no screenshot in run, skipped");
        }
    }

    let configured: BTreeSet<&str> = breakpoints.iter().map(|bp| bp.name.as_str()).collect();
    for (name, path) in available
        .iter()
        .filter(|(n, _)| !configured.contains(n.as_str()))
    {
        paths.push(path.clone());
        labels.push(name.clone());
    }

    (paths, labels)
}
