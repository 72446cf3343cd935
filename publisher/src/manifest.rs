//! Transient manifest of discovered symbol files.
//!
//! The symbol client reads the list of files to publish from a text file,
//! one path per line. [`write_manifest`] produces that file in a temporary
//! location and returns a [`Manifest`] guard that owns it. The guard removes
//! the file when [`Manifest::cleanup`] is called or when it is dropped, so
//! the manifest never outlives the run regardless of how the run ends.

use crate::discovery::DiscoveredFile;
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::io::{self, BufWriter, Write};
use tempfile::TempPath;

const MANIFEST_PREFIX: &str = "symbols-manifest-";
const MANIFEST_SUFFIX: &str = ".txt";

/// Errors arising from manifest handling.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// The temporary file could not be created.
    #[error("failed to create manifest in {dir}: {source}")]
    Create {
        /// Directory the manifest was to be created in.
        dir: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The temporary file was created under a non UTF-8 path.
    #[error("manifest path is not valid UTF-8: {path}")]
    NonUtf8Path {
        /// Lossy rendering of the path.
        path: String,
    },

    /// Writing or flushing the file list failed.
    #[error("failed to write manifest {path}: {source}")]
    Write {
        /// Path of the manifest being written.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Removing the manifest failed.
    #[error("failed to remove manifest {path}: {source}")]
    Remove {
        /// Path of the manifest.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// A written manifest file, removed when the guard goes away.
#[derive(Debug)]
pub struct Manifest {
    path: Utf8PathBuf,
    temp: TempPath,
    entries: usize,
}

impl Manifest {
    /// Path of the manifest on disk.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Number of file paths listed in the manifest.
    #[must_use]
    pub const fn entry_count(&self) -> usize {
        self.entries
    }

    /// Remove the manifest file.
    ///
    /// A manifest that has already disappeared counts as removed.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Remove`] when the file exists but cannot be
    /// deleted. Callers treat this as a warning; the run outcome does not
    /// depend on it.
    pub fn cleanup(self) -> Result<(), ManifestError> {
        let Self { path, temp, .. } = self;
        match temp.close() {
            Ok(()) => {
                debug!("removed manifest {path}");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("manifest {path} was already removed");
                Ok(())
            }
            Err(source) => Err(ManifestError::Remove { path, source }),
        }
    }
}

/// Write `files` to a new manifest in `dir`, one path per line.
///
/// The file name carries a random suffix so concurrent runs sharing `dir`
/// never collide. The file is flushed and closed before this returns.
///
/// # Errors
///
/// Returns [`ManifestError`] if the file cannot be created or written.
pub fn write_manifest(dir: &Utf8Path, files: &[DiscoveredFile]) -> Result<Manifest, ManifestError> {
    let file = tempfile::Builder::new()
        .prefix(MANIFEST_PREFIX)
        .suffix(MANIFEST_SUFFIX)
        .append(true)
        .tempfile_in(dir)
        .map_err(|source| ManifestError::Create {
            dir: dir.to_owned(),
            source,
        })?;

    let path = Utf8PathBuf::try_from(file.path().to_path_buf()).map_err(|e| {
        ManifestError::NonUtf8Path {
            path: e.as_path().display().to_string(),
        }
    })?;
    let write_error = |source| ManifestError::Write {
        path: path.clone(),
        source,
    };

    let mut writer = BufWriter::new(file);
    for entry in files {
        writeln!(writer, "{entry}").map_err(write_error)?;
    }
    let flushed = writer
        .into_inner()
        .map_err(|e| write_error(e.into_error()))?;
    flushed.as_file().sync_all().map_err(write_error)?;

    debug!("wrote {} path(s) to manifest {path}", files.len());
    Ok(Manifest {
        temp: flushed.into_temp_path(),
        path,
        entries: files.len(),
    })
}
