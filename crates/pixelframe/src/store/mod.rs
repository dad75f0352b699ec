use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const SCREENSHOTS_DIR: &str = "screenshots";
pub const COMPOSITE_DIR: &str = "composite";
pub const DIFF_DIR: &str = "diff";

const COMPOSITE_FILE: &str = "composite.png";

/// `<run>/screenshots/<breakpoint>.png`
pub fn screenshot_path(run: &Path, breakpoint: &str) -> PathBuf {
    run.join(SCREENSHOTS_DIR).join(format!("{breakpoint}.png"))
}

/// `<run>/diff/<breakpoint>.png`
pub fn diff_path(run: &Path, breakpoint: &str) -> PathBuf {
    run.join(DIFF_DIR).join(format!("{breakpoint}.png"))
}

/// `<run>/diff/<breakpoint>-side-by-side.png`
pub fn side_by_side_path(run: &Path, breakpoint: &str) -> PathBuf {
    run.join(DIFF_DIR).join(format!("{breakpoint}-side-by-side.png"))
}

pub fn composite_path(run: &Path) -> PathBuf {
    run.join(COMPOSITE_DIR).join(COMPOSITE_FILE)
}

/// Screenshots in `run`, keyed by breakpoint name, sorted.
///
/// Values are the paths as found on disk, so `mobile.PNG` is returned as is
/// rather than rebuilt through [`screenshot_path`].
pub fn list_screenshots(run: &Path) -> BTreeMap<String, PathBuf> {
    let dir = run.join(SCREENSHOTS_DIR);
    let Ok(entries) = std::fs::read_dir(&dir) else {
        return BTreeMap::new();
    };
    entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|e| e.eq_ignore_ascii_case("png"))
        })
        .filter_map(|path| {
            let stem = path.file_stem()?.to_string_lossy().into_owned();
            Some((stem, path))
        })
        .collect()
}

/// Display name of a run directory (its last path component).
pub fn run_name(run: &Path) -> String {
    run.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| run.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Canvas, WHITE};

    #[test]
    fn paths_follow_run_layout() {
        let run = Path::new("out/run-2026-10-19-101500");
        assert_eq!(
            screenshot_path(run, "mobile"),
            Path::new("out/run-2026-10-19-101500/screenshots/mobile.png")
        );
        assert_eq!(
            diff_path(run, "mobile"),
            Path::new("out/run-2026-10-19-101500/diff/mobile.png")
        );
        assert_eq!(
            side_by_side_path(run, "mobile"),
            Path::new("out/run-2026-10-19-101500/diff/mobile-side-by-side.png")
        );
        assert_eq!(
            composite_path(run),
            Path::new("out/run-2026-10-19-101500/composite/composite.png")
        );
        assert_eq!(run_name(run), "run-2026-10-19-101500");
    }

    #[test]
    fn lists_png_screenshots_only() {
        let dir = tempfile::tempdir().unwrap();
        let shots = dir.path().join(SCREENSHOTS_DIR);
        std::fs::create_dir_all(shots.join("nested.png")).unwrap();
        for name in ["tablet.png", "mobile.PNG", "notes.txt"] {
            std::fs::write(shots.join(name), b"").unwrap();
        }
        let names: Vec<String> = list_screenshots(dir.path()).into_keys().collect();
        assert_eq!(names, ["mobile", "tablet"]);
    }

    #[test]
    fn listed_paths_keep_extension_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SCREENSHOTS_DIR).join("mobile.PNG");
        Canvas::new(4, 3, WHITE).save(&path).unwrap();

        let listed = list_screenshots(dir.path());
        assert_eq!(listed["mobile"], path);
        let loaded = Canvas::load(&listed["mobile"]).unwrap();
        assert_eq!(loaded.dimensions(), (4, 3));
    }

    #[test]
    fn missing_run_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_screenshots(&dir.path().join("nope")).is_empty());
    }
}
