use std::path::Path;

use anyhow::{Context, Result};

use pixelframe::compare::DiffStatus;
use pixelframe::compare::batch::{self, DiffJob, SideBySideOutput};

use crate::config::ResolvedConfig;
use crate::report::terminal;

/// `pixelframe diff`: compare two images.
/// Returns exit code: 0 = similarity at or above threshold, 1 = below.
pub fn diff(
    config: &ResolvedConfig,
    reference: &Path,
    current: &Path,
    output: &Path,
    side_by_side: Option<&Path>,
) -> Result<i32> {
    let job = DiffJob {
        name: current.display().to_string(),
        reference: reference.to_path_buf(),
        current: current.to_path_buf(),
        output: output.to_path_buf(),
        side_by_side: side_by_side.map(|path| SideBySideOutput {
            path: path.to_path_buf(),
            reference_title: file_title(reference),
            current_title: file_title(current),
        }),
    };

    let result = batch::run(&job, config.diff_threshold).with_context(|| {
        format!(
            "Failed to diff {} against {}",
            current.display(),
            reference.display()
        )
    })?;

    terminal::print_line(&job.name, &DiffStatus::from_result(&result));
    println!("Diff written to {}", output.display());
    if let Some(path) = side_by_side {
        println!("Side-by-side written to {}", path.display());
    }

    Ok(if result.passed { 0 } else { 1 })
}

fn file_title(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
