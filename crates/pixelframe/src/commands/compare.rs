use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::debug;

use pixelframe::compare::batch::{self, DiffJob, SideBySideOutput};
use pixelframe::store;

use crate::config::{Breakpoint, ResolvedConfig};
use crate::report::terminal;

/// `pixelframe compare`: diff two runs breakpoint by breakpoint.
/// Returns exit code: 0 = all pass, 1 = any fail or error.
pub fn compare(
    config: &ResolvedConfig,
    baseline: &Path,
    current: &Path,
    json: bool,
) -> Result<i32> {
    let threshold = config.diff_threshold;
    let jobs = plan_jobs(&config.breakpoints, baseline, current);
    debug!(jobs = jobs.len(), threshold, "planned comparisons");

    let start = Instant::now();
    let report = match batch::diff_batch(&jobs, threshold) {
        Ok(report) => report,
        Err(pixelframe::Error::NoResults { errors }) => {
            for e in &errors {
                eprintln!("  {e}");
            }
            bail!(
                "No breakpoint could be compared between {} and {}",
                baseline.display(),
                current.display()
            );
        }
        Err(e) => return Err(e).context("Failed to compare runs"),
    };

    if json {
        let out = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{out}");
    } else {
        for item in &report.items {
            terminal::print_line(&item.name, &item.status);
        }
        terminal::print_actionable_summary(&report);
        terminal::print_summary(&report, threshold, start.elapsed());
    }

    if report.failed() > 0 || report.errored() > 0 {
        Ok(1)
    } else {
        Ok(0)
    }
}

/// One job per configured breakpoint, in config order.
fn plan_jobs(breakpoints: &[Breakpoint], baseline: &Path, current: &Path) -> Vec<DiffJob> {
    let baseline_title = store::run_name(baseline);
    let current_title = store::run_name(current);
    breakpoints
        .iter()
        .map(|bp| DiffJob {
            name: bp.name.clone(),
            reference: store::screenshot_path(baseline, &bp.name),
            current: store::screenshot_path(current, &bp.name),
            output: store::diff_path(current, &bp.name),
            side_by_side: Some(SideBySideOutput {
                path: store::side_by_side_path(current, &bp.name),
                reference_title: baseline_title.clone(),
                current_title: current_title.clone(),
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_breakpoints;

    #[test]
    fn jobs_follow_breakpoint_order() {
        let jobs = plan_jobs(
            &default_breakpoints(),
            Path::new("out/run-a"),
            Path::new("out/run-b"),
        );
        let names: Vec<&str> = jobs.iter().map(|j| j.name.as_str()).collect();
        assert_eq!(names, ["mobile", "tablet", "laptop", "desktop"]);
        assert_eq!(jobs[1].reference, Path::new("out/run-a/screenshots/tablet.png"));
        assert_eq!(jobs[1].current, Path::new("out/run-b/screenshots/tablet.png"));
        assert_eq!(jobs[1].output, Path::new("out/run-b/diff/tablet.png"));
        let sbs = jobs[1].side_by_side.as_ref().unwrap();
        assert_eq!(sbs.reference_title, "run-a");
        assert_eq!(sbs.current_title, "run-b");
    }
}
