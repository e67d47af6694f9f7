//! Observation file discovery
//!
//! Enumerates the files of the configured observation directory. The
//! listing is non-recursive, unfiltered by extension, and sorted
//! lexicographically by filename so repeated runs process files in the
//! same order.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::{Error, Result};

/// Discover observation files in a directory, sorted by filename.
///
/// Subdirectories and other non-file entries are skipped; everything
/// else is treated as an observation file.
pub fn discover_observation_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(Error::file_not_found(dir.to_string_lossy().to_string()));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
    {
        let entry = entry
            .map_err(|e| Error::directory_traversal("Failed to read observation directory", e))?;

        if entry.file_type().is_file() {
            files.push(entry.into_path());
        } else {
            debug!("Skipping non-file entry: {}", entry.path().display());
        }
    }

    // Sort by filename for deterministic processing order; within one
    // directory this is the same as sorting full paths.
    files.sort();

    if files.is_empty() {
        warn!("No observation files found in {}", dir.display());
    } else {
        debug!(
            "Discovered {} observation files in {}",
            files.len(),
            dir.display()
        );
    }

    Ok(files)
}
