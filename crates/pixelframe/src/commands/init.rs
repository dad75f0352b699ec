use std::path::Path;

use anyhow::{Result, bail};

use crate::config::{self, CONFIG_FILE};

/// `pixelframe init`: create pixelframe.toml.
pub fn init(force: bool) -> Result<()> {
    if !force && config::config_file_exists() {
        bail!("{CONFIG_FILE} already exists (use --force to overwrite)");
    }

    config::write_template(Path::new(CONFIG_FILE))?;

    let verb = if force { "Regenerated" } else { "Created" };
    println!("{verb} {CONFIG_FILE}");
    Ok(())
}
