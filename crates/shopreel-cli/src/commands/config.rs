use std::path::Path;

use anyhow::{bail, Result};

use shopreel_core::AppConfig;

pub fn run(config: &AppConfig, path: &Path, init: bool) -> Result<()> {
    if init {
        if path.exists() {
            bail!("Config file already exists: {}", path.display());
        }
        AppConfig::default().save_to(path)?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    if path.exists() {
        println!("# {}", path.display());
    } else {
        println!("# {} (not found, showing defaults)", path.display());
    }
    print!("{}", config.to_toml()?);
    Ok(())
}
