//! Error types for the symbol publisher.
//!
//! Each stage of a run has its own error enum; [`PublishError`] gathers them
//! so the pipeline can compose stages with `?` and report a single failure
//! at its outer boundary.

use crate::discovery::DiscoveryError;
use crate::manifest::ManifestError;
use crate::publish::PublishFailure;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that fail a publish run.
#[derive(Debug, Error)]
pub enum PublishError {
    /// A required input was absent or empty.
    #[error("Input required and not supplied: {name}")]
    MissingInput {
        /// Name of the input as the workflow spells it.
        name: &'static str,
    },

    /// The symbols folder does not exist or is not a directory.
    #[error("The folder '{path}' does not exist, please provide a valid folder")]
    SymbolsFolderNotFound {
        /// The folder that was checked.
        path: Utf8PathBuf,
    },

    /// A configured path is not valid UTF-8.
    #[error("{name} is not valid UTF-8: {path}")]
    NonUtf8Input {
        /// Which setting held the path.
        name: &'static str,
        /// Lossy rendering of the path.
        path: String,
    },

    /// Pattern expansion failed.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// The manifest could not be written.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// The publish call failed.
    #[error(transparent)]
    Publish(#[from] PublishFailure),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`PublishError`].
pub type Result<T> = std::result::Result<T, PublishError>;
