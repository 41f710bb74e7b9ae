use crate::core::{config::Config, download::Downloader, install::Installer};
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Options collected from the command line; `None` falls back to config.
#[derive(Debug, Default, Clone)]
pub struct InstallOptions {
    pub version: Option<String>,
    pub destination: Option<PathBuf>,
    pub base_url: Option<String>,
}

pub fn install_php(options: InstallOptions) -> Result<PathBuf> {
    let mut config = Config::load()?;
    if let Some(base_url) = options.base_url.as_deref() {
        config.set_base_url(base_url)?;
    }

    let version = options
        .version
        .unwrap_or_else(|| config.default_version.clone());
    let destination = options
        .destination
        .unwrap_or_else(|| config.destination.clone());

    install_with_config(&config, &version, &destination)
}

pub fn install_with_config(config: &Config, version: &str, destination: &Path) -> Result<PathBuf> {
    println!("Installing {version} into {}", destination.display());

    let downloader = Downloader::with_timeout(config.timeout())?;
    let installer = Installer::with_downloader(&config.base_url, downloader);
    println!("Source: {}{version}", installer.base_url());
    let path = installer.install(version, destination)?;

    println!("✅ PHP installed");
    println!("   Location: {}", path.display());

    Ok(path)
}
