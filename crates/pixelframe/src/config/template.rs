use std::path::Path;

use anyhow::{Context, Result};

use super::CONFIG_FILE;

/// Hand-crafted config template with commented-out keys.
/// Used by `pixelframe init` instead of `toml::to_string_pretty()` so that
/// users can see the available knobs and their defaults.
const CONFIG_TEMPLATE: &str = r#"# ─────────────────────────────────────────────────────────
# Breakpoints: one screenshot per entry. Names become file names
# (screenshots/<name>.png) and composite captions.
# ─────────────────────────────────────────────────────────
[[breakpoint]]
name = "mobile"
width = 375
height = 812
# device_scale_factor = 1.0

[[breakpoint]]
name = "tablet"
width = 768
height = 1024

[[breakpoint]]
name = "laptop"
width = 1366
height = 768

[[breakpoint]]
name = "desktop"
width = 1920
height = 1080

# ─────────────────────────────────────────────────────────
# Comparison: all fields optional.
# ─────────────────────────────────────────────────────────
[diff]
# threshold = 95.0                  # min similarity (%) for a pass

# ─────────────────────────────────────────────────────────
# Composite grid: all fields optional, sizes in pixels.
# ─────────────────────────────────────────────────────────
[composite]
# thumb_width = 600
# max_thumb_height = 1600           # taller thumbnails are cropped and faded
# label_height = 36
# inner_padding = 12
# outer_padding = 40
# fade_height = 60
# font_scale = 2                    # 8px bitmap glyphs times this
# background = [245, 245, 245]
# card_background = [255, 255, 255]
# border = [210, 210, 210]
# text = [33, 33, 33]
"#;

pub fn config_file_exists() -> bool {
    Path::new(CONFIG_FILE).exists()
}

/// Write the hand-crafted config template to `path`.
pub fn write_template(path: &Path) -> Result<()> {
    std::fs::write(path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{default_breakpoints, load_from};

    #[test]
    fn template_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        write_template(&path).unwrap();
        let config = load_from(&path).unwrap();
        assert_eq!(config.breakpoints, default_breakpoints());
        assert_eq!(config.diff.threshold, 95.0);
        assert_eq!(config.composite, Default::default());
    }
}
