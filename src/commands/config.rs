use crate::core::config::{get_config_path, Config};
use crate::error::Result;
use std::path::Path;

pub fn show_config(path_only: bool) -> Result<()> {
    let config_path = get_config_path()?;

    if path_only {
        println!("{}", config_path.display());
        return Ok(());
    }

    let config = Config::load()?;
    if !config_path.exists() {
        println!("# {} not found, showing defaults", config_path.display());
    }
    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

/// Writes the effective configuration to the config file unless one exists.
pub fn init_config() -> Result<()> {
    let config_path = get_config_path()?;
    let config = Config::load()?;

    if write_config_if_missing(&config, &config_path)? {
        println!("✅ Wrote {}", config_path.display());
    } else {
        println!("{} already exists, leaving it untouched", config_path.display());
    }

    Ok(())
}

/// Returns false when `path` already exists.
pub fn write_config_if_missing(config: &Config, path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    config.save_to(path)?;
    Ok(true)
}
