use crate::error::{PhpFetchError, Result};
use std::path::Path;

/// Mode applied to directories created by [`ensure_dir_exists`].
pub const DIR_MODE: u32 = 0o755;

/// Creates `path` and any missing parents with mode 0755.
///
/// An existing directory is left alone. Anything else already sitting at
/// `path` is rejected with [`PhpFetchError::NotADirectory`].
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(PhpFetchError::NotADirectory {
            path: path.to_path_buf(),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            create_dir_all_with_mode(path, DIR_MODE).map_err(|e| map_io_error(path, e))
        }
        Err(e) => Err(map_io_error(path, e)),
    }
}

/// `create_dir_all` that applies `mode` to every directory it creates.
/// The mode is ignored off unix.
pub fn create_dir_all_with_mode(path: &Path, mode: u32) -> std::io::Result<()> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }

    #[cfg(not(unix))]
    {
        let _ = mode;
    }

    builder.create(path)
}

/// Directory mode derived from a file mode: every read bit gains the
/// matching execute bit so the directory stays traversable.
pub fn dir_mode_for_file(mode: u32) -> u32 {
    let mode = mode & 0o777;
    mode | ((mode & 0o444) >> 2)
}

fn map_io_error(path: &Path, e: std::io::Error) -> PhpFetchError {
    match e.kind() {
        std::io::ErrorKind::PermissionDenied => PhpFetchError::PermissionDenied {
            path: path.to_path_buf(),
            source: e,
        },
        _ => PhpFetchError::from(e),
    }
}
