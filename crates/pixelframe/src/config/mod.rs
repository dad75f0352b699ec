pub mod resolve;
pub mod template;

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::debug;

use pixelframe::canvas::Font;
use pixelframe::compare::DEFAULT_THRESHOLD;
use pixelframe::composite::{BreakpointLabel, LayoutConfig};

pub use self::resolve::{CliOverrides, ResolvedConfig};
pub use self::template::{config_file_exists, write_template};

pub(crate) const CONFIG_FILE: &str = "pixelframe.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffConfig {
    /// Minimum similarity (percent) for a pair to pass.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

pub fn validate_threshold(v: f64) -> Result<f64, String> {
    if !(0.0..=100.0).contains(&v) {
        return Err(format!("threshold must be between 0.0 and 100.0, got {v}"));
    }
    Ok(v)
}

/// A named viewport the capture layer shoots at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub name: String,
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_scale")]
    pub device_scale_factor: f64,
}

fn default_scale() -> f64 {
    1.0
}

impl Breakpoint {
    fn new(name: &str, width: u32, height: u32) -> Self {
        Self {
            name: name.to_string(),
            width,
            height,
            device_scale_factor: default_scale(),
        }
    }

    pub fn label(&self) -> BreakpointLabel {
        BreakpointLabel {
            name: self.name.clone(),
            width: self.width,
            height: self.height,
        }
    }
}

pub fn default_breakpoints() -> Vec<Breakpoint> {
    vec![
        Breakpoint::new("mobile", 375, 812),
        Breakpoint::new("tablet", 768, 1024),
        Breakpoint::new("laptop", 1366, 768),
        Breakpoint::new("desktop", 1920, 1080),
    ]
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub diff: DiffConfig,
    #[serde(default)]
    pub composite: LayoutConfig,
    #[serde(default = "default_breakpoints", rename = "breakpoint")]
    pub breakpoints: Vec<Breakpoint>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            diff: DiffConfig::default(),
            composite: LayoutConfig::default(),
            breakpoints: default_breakpoints(),
        }
    }
}

impl Config {
    /// Validate semantic constraints that serde cannot express.
    fn validate(&self) -> Result<()> {
        if self.breakpoints.is_empty() {
            bail!(
                "No breakpoints configured. Add one, e.g.:\n\n  \
                 [[breakpoint]]\n  \
                 name = \"laptop\"\n  \
                 width = 1366\n  \
                 height = 768"
            );
        }

        let mut seen = BTreeSet::new();
        for bp in &self.breakpoints {
            if bp.width == 0 || bp.height == 0 {
                bail!(
                    "Breakpoint '{}' has invalid dimensions ({}x{}). \
                     Both width and height must be > 0",
                    bp.name,
                    bp.width,
                    bp.height,
                );
            }
            if !seen.insert(bp.name.as_str()) {
                bail!("Breakpoint '{}' is defined more than once", bp.name);
            }
        }

        let c = &self.composite;
        if c.thumb_width == 0 || c.max_thumb_height == 0 {
            bail!(
                "composite.thumb_width and composite.max_thumb_height must be > 0 (got {} and {})",
                c.thumb_width,
                c.max_thumb_height,
            );
        }

        // Scale 1 is always accepted: with a strip under 8px it just means
        // captions are laid out but not drawn.
        if c.font_scale > 1
            && Font::glyph_height(c.font_scale).is_none_or(|h| h > c.label_height)
        {
            bail!(
                "composite.font_scale {} does not fit composite.label_height {} \
                 (glyphs are 8px times the scale)",
                c.font_scale,
                c.label_height,
            );
        }

        Ok(())
    }
}

/// Read `pixelframe.toml` from the working directory, or defaults if absent.
pub fn load() -> Result<Config> {
    load_from(Path::new(CONFIG_FILE))
}

pub fn load_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
    validate_threshold(config.diff.threshold).map_err(|e| anyhow::anyhow!("diff.{e}"))?;
    config.validate()?;
    Ok(config)
}
