// src/extract.rs

use flate2::read::GzDecoder;
use std::{
    fs::File,
    io::BufReader,
    path::{Component, Path, PathBuf},
};
use tar::Archive;
use tracing::{debug, info, instrument, warn};

use crate::error::{EtlError, Result};

/// Drop the first path segment of an archive entry.
///
/// Returns `None` for the wrapper directory itself and for paths that would
/// escape the destination.
fn strip_first_component(path: &Path) -> Option<PathBuf> {
    let mut components = path.components();
    components.next()?;
    let rest: PathBuf = components.collect();
    if rest.as_os_str().is_empty() {
        return None;
    }
    if rest.components().all(|c| matches!(c, Component::Normal(_))) {
        Some(rest)
    } else {
        None
    }
}

/// Gunzip and untar `archive_path` into `dest`, flattening the top-level folder.
///
/// `dest` must already exist. Returns how many entries were written.
#[instrument(level = "info", skip(archive_path, dest), fields(archive = %archive_path.as_ref().display()))]
pub fn extract_tar_gz(archive_path: impl AsRef<Path>, dest: impl AsRef<Path>) -> Result<usize> {
    let archive_path = archive_path.as_ref();
    let dest = dest.as_ref();
    if !dest.is_dir() {
        return Err(EtlError::MissingDestination {
            path: dest.to_path_buf(),
        });
    }

    let extraction_err = |source| EtlError::Extraction {
        path: archive_path.to_path_buf(),
        source,
    };

    let file = File::open(archive_path).map_err(extraction_err)?;
    let mut archive = Archive::new(GzDecoder::new(BufReader::new(file)));

    let mut written = 0usize;
    for entry in archive.entries().map_err(extraction_err)? {
        let mut entry = entry.map_err(extraction_err)?;
        let raw = entry.path().map_err(extraction_err)?.into_owned();

        let Some(stripped) = strip_first_component(&raw) else {
            if raw.components().count() > 1 {
                warn!(entry = %raw.display(), "skipping entry outside destination");
            }
            continue;
        };

        let target = dest.join(&stripped);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(extraction_err)?;
        }
        entry.unpack(&target).map_err(extraction_err)?;
        debug!(entry = %stripped.display(), "extracted");
        written += 1;
    }

    info!(entries = written, "extraction complete");
    Ok(written)
}
