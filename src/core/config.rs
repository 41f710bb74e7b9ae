use crate::core::version::{normalize_base_url, DEFAULT_PHP_DIR, DEFAULT_VERSION, DOWNLOAD_URL};
use crate::error::{PhpFetchError, Result};
use crate::utils::fs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const BASE_URL_ENV: &str = "PHPFETCH_BASE_URL";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub default_version: String,
    pub destination: PathBuf,
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: DOWNLOAD_URL.to_string(),
            default_version: DEFAULT_VERSION.to_string(),
            destination: PathBuf::from(DEFAULT_PHP_DIR),
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Reads `~/.phpfetch/config.json`, falling back to defaults when the
    /// file does not exist. `PHPFETCH_BASE_URL` overrides the base URL.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&get_config_path()?)?;

        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config.set_base_url(&base_url)?;
        }

        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let mut config: Config = serde_json::from_str(&content)?;
        let base_url = config.base_url.clone();
        config.set_base_url(&base_url)?;

        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::ensure_dir_exists(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    pub fn set_base_url(&mut self, base_url: &str) -> Result<()> {
        let trimmed = base_url.trim();
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(PhpFetchError::config_error(format!(
                "base URL must start with http:// or https://, got '{base_url}'"
            )));
        }

        self.base_url = normalize_base_url(trimmed);
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn get_phpfetch_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".phpfetch"))
        .ok_or(PhpFetchError::HomeDirectoryNotFound)
}

pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_phpfetch_dir()?.join("config.json"))
}
