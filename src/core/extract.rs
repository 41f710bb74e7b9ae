use crate::error::{PhpFetchError, Result};
use crate::utils::fs::{create_dir_all_with_mode, dir_mode_for_file};
use log::{debug, info};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use zip::ZipArchive;

const DEFAULT_DIR_MODE: u32 = 0o755;
const DEFAULT_FILE_MODE: u32 = 0o644;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractSummary {
    pub files: usize,
    pub directories: usize,
}

/// Unpacks every entry of the zip at `archive_path` under `destination`.
///
/// Entries are written in central-directory order. The first failure stops
/// the run; entries written before it stay on disk.
pub fn extract_zip(archive_path: &Path, destination: &Path) -> Result<ExtractSummary> {
    info!(
        "Extracting {} to {}",
        archive_path.display(),
        destination.display()
    );

    let archive_error = |source| PhpFetchError::ArchiveError {
        path: archive_path.to_path_buf(),
        source,
    };

    let file = File::open(archive_path).map_err(|e| archive_error(e.into()))?;
    let mut archive = ZipArchive::new(file).map_err(archive_error)?;

    create_dir_all_with_mode(destination, DEFAULT_DIR_MODE).map_err(|e| {
        PhpFetchError::extraction_error(destination.display().to_string(), e)
    })?;

    let mut summary = ExtractSummary::default();
    for i in 0..archive.len() {
        if extract_entry(&mut archive, i, archive_path, destination)? {
            summary.directories += 1;
        } else {
            summary.files += 1;
        }
    }

    info!(
        "Extracted {} files and {} directories",
        summary.files, summary.directories
    );
    Ok(summary)
}

/// Writes entry `index`; returns true when it was a directory. The entry
/// reader and the output file are both released when this returns.
fn extract_entry(
    archive: &mut ZipArchive<File>,
    index: usize,
    archive_path: &Path,
    destination: &Path,
) -> Result<bool> {
    let mut entry = archive
        .by_index(index)
        .map_err(|source| PhpFetchError::ArchiveError {
            path: archive_path.to_path_buf(),
            source,
        })?;
    let name = entry.name().to_string();
    let relative = entry
        .enclosed_name()
        .ok_or_else(|| PhpFetchError::UnsafeEntry {
            entry: name.clone(),
        })?;
    let outpath = destination.join(relative);

    if entry.is_dir() {
        let mode = entry_mode(entry.unix_mode(), DEFAULT_DIR_MODE);
        debug!("Creating directory {}", outpath.display());
        create_dir_all_with_mode(&outpath, mode)
            .map_err(|e| PhpFetchError::extraction_error(&name, e))?;
        return Ok(true);
    }

    let mode = entry_mode(entry.unix_mode(), DEFAULT_FILE_MODE);
    if let Some(parent) = outpath.parent() {
        create_dir_all_with_mode(parent, dir_mode_for_file(mode))
            .map_err(|e| PhpFetchError::extraction_error(&name, e))?;
    }

    debug!("Writing {} ({} bytes)", outpath.display(), entry.size());
    let outfile =
        open_output(&outpath, mode).map_err(|e| PhpFetchError::extraction_error(&name, e))?;
    let mut writer = BufWriter::new(outfile);
    std::io::copy(&mut entry, &mut writer)
        .and_then(|_| writer.flush())
        .map_err(|e| PhpFetchError::extraction_error(&name, e))?;

    Ok(false)
}

fn entry_mode(unix_mode: Option<u32>, default: u32) -> u32 {
    unix_mode.map(|m| m & 0o777).unwrap_or(default)
}

fn open_output(path: &Path, mode: u32) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }

    #[cfg(not(unix))]
    {
        let _ = mode;
    }

    options.open(path)
}
