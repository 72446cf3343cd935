//! Symbol publish requests and the publisher seam.
//!
//! The pipeline hands a fully assembled [`SymbolRequest`] to a
//! [`Publisher`]. The production implementation drives the symbol service's
//! command-line client; tests substitute doubles.
//!
//! # Sub-modules
//!
//! - [`client`] - Download and unpacking of the symbol client.
//! - [`tool`] - [`Publisher`] implementation that runs the symbol client.

pub mod client;
pub mod tool;

use crate::credential::Credential;
use crate::naming::RequestName;
use camino::Utf8PathBuf;
use client::ClientError;

/// Fixed product identifier sent with every request from this integration.
pub const PRODUCT_ID: &str = "36530";

/// Everything the symbol service needs for one publish attempt.
#[derive(Debug, Clone)]
pub struct SymbolRequest {
    /// Unique request name.
    pub request_name: RequestName,
    /// Symbol server account.
    pub account_name: String,
    /// Account-qualified service URL.
    pub server_url: String,
    /// Folder the manifest paths are rooted under.
    pub root_folder: Utf8PathBuf,
    /// Path to the flushed manifest file.
    pub manifest_path: Utf8PathBuf,
    /// Integration product identifier, normally [`PRODUCT_ID`].
    pub product_id: String,
    /// Secret used to authenticate with the service.
    pub credential: Credential,
}

/// Publishes a symbol request to a symbol service.
#[cfg_attr(test, mockall::automock)]
pub trait Publisher {
    /// Submit `request`. The manifest it names must already be on disk.
    ///
    /// # Errors
    ///
    /// Returns [`PublishFailure`] if the request cannot be submitted or the
    /// service rejects it.
    fn publish(&self, request: &SymbolRequest) -> Result<(), PublishFailure>;
}

/// Errors arising from a publish attempt.
#[derive(Debug, thiserror::Error)]
pub enum PublishFailure {
    /// The symbol client could not be obtained.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The symbol client could not be started.
    #[error("failed to run symbol client {tool}: {source}")]
    Spawn {
        /// Path of the executable.
        tool: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The symbol client ran and reported failure.
    #[error("symbol client exited with {status}: {message}")]
    ToolFailed {
        /// Rendered exit status.
        status: String,
        /// Trimmed diagnostic output of the client.
        message: String,
    },
}
