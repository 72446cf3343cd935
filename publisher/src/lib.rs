//! Symbol publisher library.
//!
//! This crate finds debug-symbol files with glob patterns, lists them in a
//! manifest, and submits the manifest to a symbol server as one named
//! request. It backs the `publish-symbols` binary, which runs as a GitHub
//! Actions step, and can be driven programmatically through
//! [`pipeline::run`] with any [`publish::Publisher`] and [`host::Host`].
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`credential`] - Secret wrapper for the personal access token
//! - [`discovery`] - Glob expansion of search patterns into symbol files
//! - [`error`] - Error types for a publish run
//! - [`exec`] - Process execution abstraction
//! - [`host`] - CI host reporting and GitHub Actions workflow commands
//! - [`inputs`] - Action input resolution and defaults
//! - [`manifest`] - Transient manifest file listing the symbol files
//! - [`naming`] - Symbol request naming from the workflow run
//! - [`patterns`] - Parsing of newline-separated search patterns
//! - [`pipeline`] - Publish run orchestration
//! - [`publish`] - Symbol requests, the publisher seam, and the symbol client

pub mod cli;
pub mod credential;
pub mod discovery;
pub mod error;
pub mod exec;
pub mod host;
pub mod inputs;
pub mod manifest;
pub mod naming;
pub mod patterns;
pub mod pipeline;
pub mod publish;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
