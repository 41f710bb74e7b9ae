use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PhpFetchError>;

#[derive(Error, Debug)]
pub enum PhpFetchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid version: '{version}'")]
    InvalidVersion { version: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Unable to download file: {url} (HTTP {status})")]
    DownloadError { url: String, status: u16 },

    #[error("Invalid archive {path}: {source}")]
    ArchiveError {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Extraction failed for entry '{entry}': {source}")]
    ExtractionError {
        entry: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Archive entry '{entry}' escapes the destination directory")]
    UnsafeEntry { entry: String },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Installed path does not exist: {path}")]
    InstallPathMissing { path: PathBuf },

    #[error("Home directory not found")]
    HomeDirectoryNotFound,

    #[error("Permission denied: {path}")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PhpFetchError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        PhpFetchError::ConfigError {
            message: message.into(),
        }
    }

    pub(crate) fn extraction_error<S: Into<String>>(entry: S, source: std::io::Error) -> Self {
        PhpFetchError::ExtractionError {
            entry: entry.into(),
            source,
        }
    }

    /// True for every variant the archive stage can produce.
    pub fn is_archive_error(&self) -> bool {
        matches!(
            self,
            PhpFetchError::ArchiveError { .. }
                | PhpFetchError::ExtractionError { .. }
                | PhpFetchError::UnsafeEntry { .. }
        )
    }
}
