use crate::error::{PhpFetchError, Result};

/// Public host serving historical PHP Windows builds.
pub const DOWNLOAD_URL: &str = "https://windows.php.net/downloads/releases/archives/";

/// Archive fetched when no version is given.
pub const DEFAULT_VERSION: &str = "php-7.0.0-Win32-VC14-x64.zip";

/// Directory the default archive is unpacked into.
pub const DEFAULT_PHP_DIR: &str = "php-7.0.0";

/// Checks that `version` can serve both as a URL suffix and as a local
/// file name inside the destination directory.
pub fn validate_archive_name(version: &str) -> Result<()> {
    let invalid = version.trim().is_empty()
        || version == "."
        || version == ".."
        || version.contains(['/', '\\']);

    if invalid {
        return Err(PhpFetchError::InvalidVersion {
            version: version.to_string(),
        });
    }
    Ok(())
}

/// Base URL with exactly one trailing slash.
pub fn normalize_base_url(base_url: &str) -> String {
    if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{base_url}/")
    }
}

/// Remote location of `version`: the base URL and the identifier concatenated.
pub fn archive_url(base_url: &str, version: &str) -> String {
    format!("{}{version}", normalize_base_url(base_url))
}
