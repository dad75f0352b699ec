use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

use pixelframe::composite;

use crate::config::ResolvedConfig;

/// `pixelframe composite`: lay out explicit images on a grid.
pub fn composite(
    config: &ResolvedConfig,
    images: &[PathBuf],
    labels: &[String],
    output: &Path,
) -> Result<()> {
    if labels.len() > images.len() {
        warn!(
            labels = labels.len(),
            images = images.len(),
            "more labels than images, extra labels ignored"
        );
    }

    let canvas = composite::compose_files(images, labels, output, &config.layout)
        .context("Failed to build composite")?;

    println!(
        "Composite written to {} ({}x{}, {} image(s))",
        output.display(),
        canvas.width(),
        canvas.height(),
        images.len()
    );
    Ok(())
}
