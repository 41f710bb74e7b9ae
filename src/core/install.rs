use crate::core::download::Downloader;
use crate::core::extract::extract_zip;
use crate::core::version::{archive_url, normalize_base_url, validate_archive_name, DOWNLOAD_URL};
use crate::error::{PhpFetchError, Result};
use crate::utils::fs;
use log::info;
use std::path::{Path, PathBuf};

/// Installs `version` into `destination` from the default host.
pub fn install(version: &str, destination: &Path) -> Result<PathBuf> {
    Installer::new()?.install(version, destination)
}

pub struct Installer {
    base_url: String,
    downloader: Downloader,
}

impl Installer {
    pub fn new() -> Result<Self> {
        Ok(Self::with_downloader(DOWNLOAD_URL, Downloader::new()?))
    }

    pub fn with_downloader(base_url: &str, downloader: Downloader) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            downloader,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ensures `destination`, fetches `<base>/<version>` into
    /// `destination/<version>` unless it is already there, unpacks it in
    /// place and returns the absolute destination with a trailing separator.
    pub fn install(&self, version: &str, destination: &Path) -> Result<PathBuf> {
        validate_archive_name(version)?;

        fs::ensure_dir_exists(destination)?;

        let url = archive_url(&self.base_url, version);
        let archive_path = destination.join(version);
        self.downloader.download_file(&url, &archive_path)?;

        extract_zip(&archive_path, destination)?;

        let path = absolute_destination(destination)?;
        match std::fs::metadata(&path) {
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PhpFetchError::InstallPathMissing { path });
            }
            Err(e) => return Err(e.into()),
        }

        info!("PHP {version} installed in {}", path.display());
        Ok(path)
    }
}

/// Absolute parent of `destination` joined with its last component, plus a
/// trailing separator. Destinations without a usable last component (`.`,
/// `..`, a root) are canonicalized instead.
pub fn absolute_destination(destination: &Path) -> Result<PathBuf> {
    let Some(name) = destination.file_name() else {
        return Ok(std::fs::canonicalize(destination)?.join(""));
    };

    let parent = match destination.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let parent = std::path::absolute(parent)?;

    Ok(parent.join(name).join(""))
}
