//! Publish run orchestration.
//!
//! A run is a fixed sequence of stages: validate the inputs, discover symbol
//! files, name the request, write the manifest, publish, and remove the
//! manifest. Each stage returns a `Result` and the stages compose with `?`;
//! [`report_outcome`] is the single place where an error becomes a failed
//! run.

use crate::discovery::{DiscoveredFile, discover_files};
use crate::error::{PublishError, Result};
use crate::host::Host;
use crate::inputs::PublishInputs;
use crate::manifest::{Manifest, write_manifest};
use crate::naming::{RequestName, RunContext};
use crate::patterns::parse_patterns;
use crate::publish::{PRODUCT_ID, Publisher, SymbolRequest};
use log::debug;

/// Warning reported when no pattern matched a file.
pub const NO_FILES_MESSAGE: &str = "No files present in match list, the match had 0 matches";

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishSummary {
    /// Name of the symbol request.
    pub request_name: RequestName,
    /// Number of files listed in the manifest.
    pub file_count: usize,
    /// Whether the request was submitted (false for dry runs).
    pub published: bool,
}

/// Execute one publish run.
///
/// The manifest is removed once the publish call returns, whether it
/// succeeded or not. Failing to remove it is reported as a warning and does
/// not change the outcome.
///
/// # Errors
///
/// Returns [`PublishError`] if a required input is missing, the symbols
/// folder does not exist, discovery or manifest writing fails, or the
/// publisher reports a failure.
pub fn run(
    inputs: &PublishInputs,
    context: &RunContext,
    publisher: &dyn Publisher,
    host: &mut dyn Host,
) -> Result<PublishSummary> {
    let account_name = inputs.require_account()?;
    let credential = inputs.require_credential()?;
    if !inputs.symbols_folder.is_dir() {
        return Err(PublishError::SymbolsFolderNotFound {
            path: inputs.symbols_folder.clone(),
        });
    }

    let files = discover(inputs, host)?;

    let request_name = RequestName::generate(context);
    host.info(&format!("Symbol Request Name = {request_name}"));

    let manifest = write_manifest(&inputs.manifest_dir, &files)?;
    let request = SymbolRequest {
        request_name,
        account_name: account_name.to_owned(),
        server_url: inputs.server_url(account_name),
        root_folder: inputs.symbols_folder.clone(),
        manifest_path: manifest.path().to_owned(),
        product_id: PRODUCT_ID.to_owned(),
        credential: credential.clone(),
    };

    let outcome = if inputs.dry_run {
        report_dry_run(&request, &files, host);
        Ok(false)
    } else {
        publisher.publish(&request).map(|()| true)
    };
    release(manifest, host);
    let published = outcome?;

    Ok(PublishSummary {
        request_name: request.request_name,
        file_count: files.len(),
        published,
    })
}

/// Execute one publish run and report its outcome to `host`.
///
/// See [`report_outcome`] for how a failure is surfaced.
pub fn run_action(
    inputs: &PublishInputs,
    context: &RunContext,
    publisher: &dyn Publisher,
    host: &mut dyn Host,
) -> Option<PublishSummary> {
    let outcome = run(inputs, context, publisher, host);
    report_outcome(outcome, host)
}

/// Report the outcome of a run to `host`.
///
/// An error is reported once through [`Host::set_failed`] as
/// `Action failed with error <description>`. Errors raised before the run
/// starts, such as unreadable inputs, go through here as well.
pub fn report_outcome(
    outcome: Result<PublishSummary>,
    host: &mut dyn Host,
) -> Option<PublishSummary> {
    match outcome {
        Ok(summary) => Some(summary),
        Err(err) => {
            host.set_failed(&format!("Action failed with error {err}"));
            None
        }
    }
}

fn discover(inputs: &PublishInputs, host: &mut dyn Host) -> Result<Vec<DiscoveredFile>> {
    let patterns = parse_patterns(&inputs.search_pattern);
    debug!(
        "expanding {} pattern(s) under {}",
        patterns.len(),
        inputs.symbols_folder
    );
    let files = discover_files(&inputs.symbols_folder, &patterns)?;

    host.info(&format!("Found {} files", files.len()));
    if files.is_empty() {
        host.warning(NO_FILES_MESSAGE);
    }
    Ok(files)
}

fn report_dry_run(request: &SymbolRequest, files: &[DiscoveredFile], host: &mut dyn Host) {
    host.info(&format!(
        "Dry run: would publish {} file(s) to {} as {}",
        files.len(),
        request.server_url,
        request.request_name
    ));
    for file in files {
        host.info(&format!("  {file}"));
    }
}

fn release(manifest: Manifest, host: &mut dyn Host) {
    if let Err(err) = manifest.cleanup() {
        host.warning(&format!("{err}"));
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
