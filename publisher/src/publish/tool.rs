//! [`Publisher`] backed by the symbol service's command-line client.
//!
//! The client reads the manifest itself, uploads every listed file, and
//! finalizes the request. The personal access token reaches it only through
//! the environment of the child process.

use super::client::{ClientDownloader, fetch_client};
use super::{PublishFailure, Publisher, SymbolRequest};
use crate::exec::CommandExecutor;
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info};

/// Environment variable the client reads the token from.
pub const PAT_ENV_VAR: &str = "SYMBOL_PAT_AUTH_TOKEN";

/// Publishes by running the symbol client.
///
/// When constructed with a local executable the client is used as-is;
/// otherwise it is downloaded from the service for each publish call.
#[derive(Debug)]
pub struct SymbolToolPublisher<E, D> {
    executor: E,
    downloader: D,
    local_tool: Option<Utf8PathBuf>,
}

impl<E, D> SymbolToolPublisher<E, D>
where
    E: CommandExecutor,
    D: ClientDownloader,
{
    /// Create a publisher, optionally pinned to a local client executable.
    #[must_use]
    pub const fn new(executor: E, downloader: D, local_tool: Option<Utf8PathBuf>) -> Self {
        Self {
            executor,
            downloader,
            local_tool,
        }
    }

    fn run_client(&self, tool: &Utf8Path, request: &SymbolRequest) -> Result<(), PublishFailure> {
        let args = publish_arguments(request);
        debug!("running {tool} {}", args.join(" "));
        let envs = [(
            PAT_ENV_VAR.to_owned(),
            request.credential.expose().to_owned(),
        )];

        let output =
            self.executor
                .run(tool, &args, &envs)
                .map_err(|source| PublishFailure::Spawn {
                    tool: tool.to_owned(),
                    source,
                })?;

        for line in String::from_utf8_lossy(&output.stdout).lines() {
            info!("{line}");
        }
        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let message = if stderr.trim().is_empty() {
            stdout.trim().to_owned()
        } else {
            stderr.trim().to_owned()
        };
        Err(PublishFailure::ToolFailed {
            status: output.status.to_string(),
            message,
        })
    }
}

impl<E, D> Publisher for SymbolToolPublisher<E, D>
where
    E: CommandExecutor,
    D: ClientDownloader,
{
    fn publish(&self, request: &SymbolRequest) -> Result<(), PublishFailure> {
        if let Some(tool) = &self.local_tool {
            return self.run_client(tool, request);
        }
        let client = fetch_client(&self.downloader, &request.server_url, &request.credential)?;
        self.run_client(client.executable(), request)
    }
}

/// Command-line arguments for a `publish` invocation of the client.
///
/// The credential is deliberately absent; see [`PAT_ENV_VAR`].
#[must_use]
pub fn publish_arguments(request: &SymbolRequest) -> Vec<String> {
    [
        "publish",
        "--service",
        request.server_url.as_str(),
        "--name",
        request.request_name.as_str(),
        "--directory",
        request.root_folder.as_str(),
        "--filelist",
        request.manifest_path.as_str(),
        "--expirationInDays",
        request.product_id.as_str(),
        "--patAuthEnvVar",
        PAT_ENV_VAR,
        "--tracelevel",
        "verbose",
        "--globalretrycount",
        "2",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}
