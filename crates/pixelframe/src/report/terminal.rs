use std::time::Duration;

use pixelframe::compare::DiffStatus;
use pixelframe::compare::batch::BatchReport;

pub fn format_duration(d: Duration) -> String {
    let ms = d.as_millis();
    if ms < 1000 {
        format!("{ms}ms")
    } else {
        format!("{:.1}s", d.as_secs_f64())
    }
}

/// One result line, without trailing newline.
pub fn format_line(name: &str, status: &DiffStatus) -> String {
    match status {
        DiffStatus::Pass { similarity } => {
            format!("  \x1b[32mPASS\x1b[0m  {name}  ({similarity:.2}%)")
        }
        DiffStatus::Fail {
            similarity,
            dimension_mismatch,
        } => match dimension_mismatch {
            Some((rw, rh, cw, ch)) => format!(
                "  \x1b[31mFAIL\x1b[0m  {name}  ({similarity:.2}%, dimensions changed: {rw}x{rh} -> {cw}x{ch})"
            ),
            None => format!("  \x1b[31mFAIL\x1b[0m  {name}  ({similarity:.2}%)"),
        },
        DiffStatus::Error { message } => {
            format!("  \x1b[31m ERR\x1b[0m  {name}  ({message})")
        }
    }
}

/// Print a single comparison result line.
pub fn print_line(name: &str, status: &DiffStatus) {
    println!("{}", format_line(name, status));
}

/// Print names of failed and errored pairs, grouped.
/// Only prints sections with at least one entry.
pub fn print_actionable_summary(report: &BatchReport) {
    let pick = |pred: fn(&DiffStatus) -> bool| {
        report
            .items
            .iter()
            .filter(|item| pred(&item.status))
            .map(|item| item.name.as_str())
            .collect::<Vec<&str>>()
    };
    let failed = pick(|s| matches!(s, DiffStatus::Fail { .. }));
    let errored = pick(|s| matches!(s, DiffStatus::Error { .. }));
    if failed.is_empty() && errored.is_empty() {
        return;
    }

    println!();
    println!("Actionable breakpoints:");
    for (label, names) in [("Failed", &failed), ("Errored", &errored)] {
        if !names.is_empty() {
            println!();
            println!("  {label} ({}):", names.len());
            for name in names.iter() {
                println!("    {name}");
            }
        }
    }
}

/// Print the final summary.
pub fn print_summary(report: &BatchReport, threshold: f64, elapsed: Duration) {
    let (total, passed, failed, errored) = (
        report.items.len(),
        report.passed(),
        report.failed(),
        report.errored(),
    );
    println!();
    print!(
        "Breakpoints:  {total} total, \x1b[32m{passed} passed\x1b[0m, \x1b[31m{failed} failed\x1b[0m"
    );
    if errored > 0 {
        print!(", \x1b[31m{errored} errored\x1b[0m");
    }
    println!();
    println!("Threshold:    {threshold:.2}%");
    println!("Time:         {}", format_duration(elapsed));

    if failed > 0 {
        println!();
        println!("{failed} breakpoint(s) are below the similarity threshold.");
    }
    if errored > 0 {
        println!("{errored} breakpoint(s) could not be compared (partial result).");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations() {
        assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
        assert_eq!(format_duration(Duration::from_millis(1530)), "1.5s");
    }

    #[test]
    fn lines_carry_similarity() {
        let pass = format_line("mobile", &DiffStatus::Pass { similarity: 99.5 });
        assert!(pass.contains("PASS") && pass.contains("mobile") && pass.contains("99.50%"));

        let fail = format_line(
            "tablet",
            &DiffStatus::Fail {
                similarity: 12.0,
                dimension_mismatch: Some((768, 1024, 768, 1100)),
            },
        );
        assert!(fail.contains("FAIL") && fail.contains("768x1024 -> 768x1100"));

        let err = format_line(
            "desktop",
            &DiffStatus::Error {
                message: "image not found".into(),
            },
        );
        assert!(err.contains("ERR") && err.contains("image not found"));
    }
}
