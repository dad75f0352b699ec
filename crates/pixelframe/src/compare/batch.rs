use std::error::Error as StdError;
use std::path::PathBuf;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use super::DiffStatus;
use super::diff::{DiffResult, diff};
use crate::canvas::Canvas;
use crate::composite::side_by_side;
use crate::error::{Error, Result};

/// One pair to compare.
#[derive(Debug, Clone)]
pub struct DiffJob {
    /// Display name, usually the breakpoint name.
    pub name: String,
    pub reference: PathBuf,
    pub current: PathBuf,
    /// Where the highlighted diff is written.
    pub output: PathBuf,
    /// Optional three-panel (reference, current, diff) image.
    pub side_by_side: Option<SideBySideOutput>,
}

#[derive(Debug, Clone)]
pub struct SideBySideOutput {
    pub path: PathBuf,
    pub reference_title: String,
    pub current_title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchItem {
    pub name: String,
    #[serde(flatten)]
    pub status: DiffStatus,
}

/// Per-pair results, in job order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub items: Vec<BatchItem>,
}

impl BatchReport {
    pub fn passed(&self) -> usize {
        self.count(|s| matches!(s, DiffStatus::Pass { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, DiffStatus::Fail { .. }))
    }

    pub fn errored(&self) -> usize {
        self.count(|s| matches!(s, DiffStatus::Error { .. }))
    }

    /// Some pairs could not be compared at all.
    pub fn is_partial(&self) -> bool {
        self.errored() > 0
    }

    fn count(&self, pred: impl Fn(&DiffStatus) -> bool) -> usize {
        self.items.iter().filter(|item| pred(&item.status)).count()
    }
}

/// Diff every job on the rayon pool.
///
/// A job that fails (missing file, decode error) is reported as
/// [`DiffStatus::Error`] and does not stop the others. The batch itself fails
/// only when there is nothing to compare or nothing could be compared.
pub fn diff_batch(jobs: &[DiffJob], threshold: f64) -> Result<BatchReport> {
    if jobs.is_empty() {
        return Err(Error::EmptyInput);
    }
    debug!(jobs = jobs.len(), threshold, "starting diff batch");

    // `collect` on an indexed parallel iterator keeps input order.
    let items: Vec<BatchItem> = jobs
        .par_iter()
        .map(|job| {
            let status = match run(job, threshold) {
                Ok(result) => DiffStatus::from_result(&result),
                Err(e) => {
                    warn!(name = %job.name, error = %e, "diff failed");
                    DiffStatus::Error {
                        message: error_chain(&e),
                    }
                }
            };
            BatchItem {
                name: job.name.clone(),
                status,
            }
        })
        .collect();

    let report = BatchReport { items };
    if report.errored() == report.items.len() {
        let errors = report
            .items
            .into_iter()
            .filter_map(|item| match item.status {
                DiffStatus::Error { message } => Some(format!("{}: {message}", item.name)),
                _ => None,
            })
            .collect();
        return Err(Error::NoResults { errors });
    }
    Ok(report)
}

/// Diff a single job, writing its outputs.
pub fn run(job: &DiffJob, threshold: f64) -> Result<DiffResult> {
    let reference = Canvas::load(&job.reference)?;
    let current = Canvas::load(&job.current)?;
    let result = diff(&reference, &current, threshold)?;
    result.diff_image.save(&job.output)?;

    if let Some(sbs) = &job.side_by_side {
        let panels = [
            (&reference, sbs.reference_title.as_str()),
            (&current, sbs.current_title.as_str()),
            (&result.diff_image, side_by_side::DIFF_TITLE),
        ];
        side_by_side::side_by_side(&panels)?.save(&sbs.path)?;
    }

    debug!(name = %job.name, similarity = result.similarity, "diffed");
    Ok(result)
}

fn error_chain(e: &Error) -> String {
    let mut msg = e.to_string();
    let mut source = e.source();
    while let Some(s) = source {
        msg.push_str(": ");
        msg.push_str(&s.to_string());
        source = StdError::source(s);
    }
    msg
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use image::Rgb;

    use super::*;
    use crate::canvas::{RED, WHITE};

    fn job(dir: &Path, name: &str) -> DiffJob {
        DiffJob {
            name: name.to_string(),
            reference: dir.join("a").join(format!("{name}.png")),
            current: dir.join("b").join(format!("{name}.png")),
            output: dir.join("diff").join(format!("{name}.png")),
            side_by_side: None,
        }
    }

    fn write(path: &Path, canvas: &Canvas) {
        canvas.save(path).unwrap();
    }

    #[test]
    fn empty_batch_is_error() {
        assert!(matches!(diff_batch(&[], 95.0), Err(Error::EmptyInput)));
    }

    #[test]
    fn results_follow_job_order() {
        let dir = tempfile::tempdir().unwrap();
        let names = ["mobile", "tablet", "laptop", "desktop", "wide", "tv"];
        let jobs: Vec<DiffJob> = names.iter().map(|n| job(dir.path(), n)).collect();
        for (i, j) in jobs.iter().enumerate() {
            let size = 20 + i as u32 * 15;
            write(&j.reference, &Canvas::new(size, size, WHITE));
            let current = if i % 2 == 0 { WHITE } else { RED };
            write(&j.current, &Canvas::new(size, size, current));
        }

        let report = diff_batch(&jobs, 95.0).unwrap();
        let got: Vec<&str> = report.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(got, names);
        assert_eq!(report.passed(), 3);
        assert_eq!(report.failed(), 3);
        assert!(!report.is_partial());
        assert!(jobs.iter().all(|j| j.output.exists()));
    }

    #[test]
    fn partial_success_keeps_errors() {
        let dir = tempfile::tempdir().unwrap();
        let ok = job(dir.path(), "ok");
        let missing = job(dir.path(), "missing");
        write(&ok.reference, &Canvas::new(8, 8, WHITE));
        write(&ok.current, &Canvas::new(8, 8, WHITE));
        write(&missing.reference, &Canvas::new(8, 8, WHITE));

        let report = diff_batch(&[missing, ok], 95.0).unwrap();
        assert!(report.is_partial());
        assert_eq!(report.items[0].name, "missing");
        assert!(matches!(
            &report.items[0].status,
            DiffStatus::Error { message } if message.contains("missing.png")
        ));
        assert_eq!(
            report.items[1].status,
            DiffStatus::Pass { similarity: 100.0 }
        );
    }

    #[test]
    fn all_failed_is_hard_failure() {
        let dir = tempfile::tempdir().unwrap();
        let jobs = [job(dir.path(), "x"), job(dir.path(), "y")];
        match diff_batch(&jobs, 95.0) {
            Err(Error::NoResults { errors }) => {
                assert_eq!(errors.len(), 2);
                assert!(errors[0].starts_with("x: "));
            }
            other => panic!("expected NoResults, got {other:?}"),
        }
    }

    #[test]
    fn writes_side_by_side() {
        let dir = tempfile::tempdir().unwrap();
        let mut j = job(dir.path(), "laptop");
        let sbs = dir.path().join("diff").join("laptop-side-by-side.png");
        j.side_by_side = Some(SideBySideOutput {
            path: sbs.clone(),
            reference_title: "baseline".into(),
            current_title: "current".into(),
        });
        write(&j.reference, &Canvas::new(30, 20, Rgb([0, 0, 0])));
        write(&j.current, &Canvas::new(30, 25, WHITE));

        diff_batch(&[j], 95.0).unwrap();
        let panel = Canvas::load(&sbs).unwrap();
        // Three 30px panels, four 20px gaps; tallest panel 25 + 60.
        assert_eq!(panel.dimensions(), (170, 85));
    }
}
