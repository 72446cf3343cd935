//! Symbol client retrieval.
//!
//! The symbol service distributes its command-line client as a zip archive
//! behind an authenticated endpoint on the account's service URL. The
//! client is downloaded per run into a scoped temporary directory and
//! deleted with it.

use crate::credential::Credential;
use base64::Engine as _;
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::path::{Component, Path};
use std::sync::OnceLock;
use std::time::Duration;
use tempfile::TempDir;

/// Service-relative endpoint serving the client archive.
pub const CLIENT_ENDPOINT: &str = "_apis/symbol/client/task";

/// Location of the client executable inside the unpacked archive.
pub const CLIENT_EXECUTABLE: &str = "lib/net45/symbol.exe";

/// Network timeout for the client download.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// Errors arising while fetching the symbol client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("download failed for {url}: {reason}")]
    Http {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The service did not accept the credential.
    #[error("authentication rejected by {url} (HTTP {status})")]
    Unauthorized {
        /// The URL that was requested.
        url: String,
        /// The HTTP status returned.
        status: u16,
    },

    /// The client archive was not found (HTTP 404).
    #[error("symbol client not found: {url}")]
    NotFound {
        /// The URL that returned 404.
        url: String,
    },

    /// The downloaded file is not a readable zip archive.
    #[error("invalid symbol client archive: {reason}")]
    Archive {
        /// Description of the archive error.
        reason: String,
    },

    /// An archive entry attempts to escape the extraction directory.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The offending entry name.
        path: String,
    },

    /// The archive unpacked without the expected executable.
    #[error("symbol client executable missing at {path}")]
    ExecutableMissing {
        /// Where the executable was expected.
        path: Utf8PathBuf,
    },

    /// The scratch directory is not valid UTF-8.
    #[error("client directory is not valid UTF-8: {path}")]
    NonUtf8Path {
        /// Lossy rendering of the path.
        path: String,
    },

    /// I/O error while writing or unpacking the client.
    #[error("I/O error handling symbol client: {0}")]
    Io(#[from] std::io::Error),
}

/// Downloads the symbol client archive.
#[cfg_attr(test, mockall::automock)]
pub trait ClientDownloader {
    /// Download the client archive for `server_url` into `dest`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the file cannot be written.
    fn download_client(
        &self,
        server_url: &str,
        credential: &Credential,
        dest: &Path,
    ) -> Result<(), ClientError>;
}

/// HTTP-based downloader using `ureq`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpClientDownloader;

impl HttpClientDownloader {
    /// Build the client download URL for an account-qualified service URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use symbol_publisher::publish::client::HttpClientDownloader;
    ///
    /// let url = HttpClientDownloader::client_url("https://artifacts.dev.azure.com/contoso/");
    /// assert_eq!(url, "https://artifacts.dev.azure.com/contoso/_apis/symbol/client/task");
    /// ```
    #[must_use]
    pub fn client_url(server_url: &str) -> String {
        format!("{}/{CLIENT_ENDPOINT}", server_url.trim_end_matches('/'))
    }
}

impl ClientDownloader for HttpClientDownloader {
    fn download_client(
        &self,
        server_url: &str,
        credential: &Credential,
        dest: &Path,
    ) -> Result<(), ClientError> {
        let url = Self::client_url(server_url);
        debug!("downloading symbol client from {url}");
        let response = http_agent()
            .get(&url)
            .header("Authorization", basic_auth(credential))
            .call()
            .map_err(|e| map_ureq_error(&url, &e))?;
        let mut file = std::fs::File::create(dest)?;
        std::io::copy(&mut response.into_body().as_reader(), &mut file)?;
        Ok(())
    }
}

/// HTTP Basic authorization value for a personal access token.
fn basic_auth(credential: &Credential) -> String {
    let encoded =
        base64::engine::general_purpose::STANDARD.encode(format!(":{}", credential.expose()));
    format!("Basic {encoded}")
}

/// Shared `ureq` agent with request timeout configuration.
fn http_agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(DOWNLOAD_TIMEOUT))
            .build();
        ureq::Agent::new_with_config(config)
    })
}

/// Map a ureq error to a [`ClientError`].
fn map_ureq_error(url: &str, err: &ureq::Error) -> ClientError {
    match err {
        ureq::Error::StatusCode(404) => ClientError::NotFound {
            url: url.to_owned(),
        },
        ureq::Error::StatusCode(status @ (401 | 403)) => ClientError::Unauthorized {
            url: url.to_owned(),
            status: *status,
        },
        other => ClientError::Http {
            url: url.to_owned(),
            reason: other.to_string(),
        },
    }
}

/// An unpacked symbol client, deleted when dropped.
#[derive(Debug)]
pub struct SymbolClient {
    _dir: TempDir,
    executable: Utf8PathBuf,
}

impl SymbolClient {
    /// Path of the client executable.
    #[must_use]
    pub fn executable(&self) -> &Utf8Path {
        &self.executable
    }
}

/// Download and unpack the symbol client for `server_url`.
///
/// # Errors
///
/// Returns [`ClientError`] if the download, extraction, or executable
/// lookup fails.
pub fn fetch_client(
    downloader: &dyn ClientDownloader,
    server_url: &str,
    credential: &Credential,
) -> Result<SymbolClient, ClientError> {
    let dir = tempfile::Builder::new().prefix("symbol-client-").tempdir()?;
    let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).map_err(|e| {
        ClientError::NonUtf8Path {
            path: e.as_path().display().to_string(),
        }
    })?;

    let archive = root.join("client.zip");
    downloader.download_client(server_url, credential, archive.as_std_path())?;

    let unpacked = root.join("client");
    std::fs::create_dir_all(&unpacked)?;
    let extracted = extract_archive(archive.as_std_path(), unpacked.as_std_path())?;
    debug!("unpacked {} symbol client file(s) to {unpacked}", extracted.len());

    let executable = unpacked.join(CLIENT_EXECUTABLE);
    if !executable.is_file() {
        return Err(ClientError::ExecutableMissing { path: executable });
    }
    Ok(SymbolClient {
        _dir: dir,
        executable,
    })
}

/// Unpack the zip archive at `archive_path` into `dest_dir`.
///
/// Returns the names of the extracted files.
///
/// # Errors
///
/// Returns [`ClientError::PathTraversal`] if an entry would land outside
/// `dest_dir`, [`ClientError::Archive`] if the archive is unreadable, and
/// [`ClientError::Io`] on I/O failures.
pub fn extract_archive(archive_path: &Path, dest_dir: &Path) -> Result<Vec<String>, ClientError> {
    let file = std::fs::File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| archive_error(&e))?;
    let mut extracted = Vec::new();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|e| archive_error(&e))?;
        let relative = entry
            .enclosed_name()
            .filter(|path| is_contained(path))
            .ok_or_else(|| ClientError::PathTraversal {
                path: entry.name().to_owned(),
            })?;
        let dest_path = dest_dir.join(&relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&dest_path)?;
            continue;
        }
        if let Some(parent) = dest_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut out = std::fs::File::create(&dest_path)?;
        std::io::copy(&mut entry, &mut out)?;
        extracted.push(relative.to_string_lossy().into_owned());
    }

    Ok(extracted)
}

/// Reject absolute paths and `..` components.
fn is_contained(path: &Path) -> bool {
    path.components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}

fn archive_error(err: &zip::result::ZipError) -> ClientError {
    ClientError::Archive {
        reason: err.to_string(),
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
