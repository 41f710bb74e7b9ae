use crate::error::{PhpFetchError, Result};
use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Blocking HTTP fetcher with a skip-by-presence cache.
pub struct Downloader {
    client: Client,
}

impl Downloader {
    /// Client without any request timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(None)
    }

    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Fetches `url` into `destination`.
    ///
    /// Returns `Ok(false)` without touching the network when something
    /// already exists at `destination`, `Ok(true)` after a download. Nothing
    /// is written before the server answers 200; the body is streamed into
    /// a `.part` sibling and renamed into place once complete.
    pub fn download_file(&self, url: &str, destination: &Path) -> Result<bool> {
        if destination.exists() {
            debug!("{} already present, skipping download", destination.display());
            return Ok(false);
        }

        info!("Downloading {url}");
        let mut response = self.client.get(url).send()?;

        if response.status() != StatusCode::OK {
            return Err(PhpFetchError::DownloadError {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let part_path = part_path(destination);
        let written = match write_body(&mut response, &part_path) {
            Ok(written) => written,
            Err(e) => {
                let _ = std::fs::remove_file(&part_path);
                return Err(e);
            }
        };
        std::fs::rename(&part_path, destination)?;

        info!("Downloaded {written} bytes to {}", destination.display());
        Ok(true)
    }
}

fn write_body(response: &mut reqwest::blocking::Response, path: &Path) -> Result<u64> {
    let mut out = BufWriter::new(File::create(path)?);
    let written = std::io::copy(response, &mut out).map_err(classify_copy_error)?;
    out.flush()?;

    let file = out.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    Ok(written)
}

/// Body read failures come back from `io::copy` as an `io::Error` wrapping
/// the client error; unwrap those into `Transport`. Local write failures
/// stay `Io`.
fn classify_copy_error(e: std::io::Error) -> PhpFetchError {
    let from_client = e
        .get_ref()
        .is_some_and(|inner| inner.is::<reqwest::Error>());
    if !from_client {
        return PhpFetchError::Io(e);
    }

    let kind = e.kind();
    match e.into_inner().map(|inner| inner.downcast::<reqwest::Error>()) {
        Some(Ok(err)) => PhpFetchError::Transport(*err),
        Some(Err(inner)) => PhpFetchError::Io(std::io::Error::new(kind, inner)),
        None => PhpFetchError::Io(std::io::Error::from(kind)),
    }
}

fn part_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    destination.with_file_name(name)
}
