//! CLI argument definitions for the symbol publisher.
//!
//! Every flag here is optional. Values given on the command line take
//! precedence over the action inputs the runner passes through `INPUT_*`
//! environment variables; see [`crate::inputs`]. The personal access token
//! has no flag and is only read from the action input.

use camino::Utf8PathBuf;
use clap::Parser;

/// Publish debug symbols to a symbol server.
#[derive(Parser, Debug, Clone)]
#[command(name = "publish-symbols")]
#[command(version, about)]
#[command(long_about = concat!(
    "Publish debug symbols to a symbol server.\n\n",
    "Finds symbol files under the symbols folder using newline-separated glob ",
    "patterns, writes them to a manifest, and submits the manifest as a single ",
    "symbol request named after the current workflow run.\n\n",
    "Settings are read from GitHub Actions inputs (INPUT_ACCOUNTNAME, ",
    "INPUT_SYMBOLSERVICEURL, INPUT_PERSONALACCESSTOKEN, INPUT_SYMBOLSFOLDER, ",
    "INPUT_SEARCHPATTERN); the flags below override them.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Publish with action inputs from the environment:\n",
    "    $ publish-symbols\n\n",
    "  Preview the request without contacting the service:\n",
    "    $ publish-symbols --account-name contoso --dry-run\n\n",
    "  Use a locally installed symbol client:\n",
    "    $ publish-symbols --symbol-tool /opt/symbol/lib/net45/symbol.exe",
))]
pub struct Cli {
    /// Symbol server account name.
    #[arg(long, value_name = "NAME")]
    pub account_name: Option<String>,

    /// Base URL of the symbol service; the account name is appended.
    #[arg(long, value_name = "URL")]
    pub service_url: Option<String>,

    /// Folder the search patterns are rooted at.
    #[arg(long, value_name = "DIR")]
    pub symbols_folder: Option<Utf8PathBuf>,

    /// Glob pattern selecting symbol files (can be repeated).
    #[arg(long, value_name = "GLOB")]
    pub search_pattern: Vec<String>,

    /// Use this symbol client instead of downloading one.
    #[arg(long, value_name = "PATH")]
    pub symbol_tool: Option<Utf8PathBuf>,

    /// Write the manifest and report the request without publishing.
    #[arg(long)]
    pub dry_run: bool,

    /// Increase log verbosity (repeatable: -v, -vv).
    #[arg(short, long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl Cli {
    /// Search patterns given on the command line as one multi-line value.
    ///
    /// Returns `None` when no `--search-pattern` flag was supplied so the
    /// action input or default applies.
    ///
    /// # Examples
    ///
    /// ```
    /// use symbol_publisher::cli::Cli;
    ///
    /// let cli = Cli {
    ///     search_pattern: vec!["**/*.pdb".to_owned(), "**/*.so.dbg".to_owned()],
    ///     ..Cli::default()
    /// };
    /// assert_eq!(cli.search_patterns().as_deref(), Some("**/*.pdb\n**/*.so.dbg"));
    /// assert!(Cli::default().search_patterns().is_none());
    /// ```
    #[must_use]
    pub fn search_patterns(&self) -> Option<String> {
        if self.search_pattern.is_empty() {
            None
        } else {
            Some(self.search_pattern.join("\n"))
        }
    }
}

impl Default for Cli {
    /// Creates a `Cli` with no overrides, as if run without arguments.
    ///
    /// # Examples
    ///
    /// ```
    /// use symbol_publisher::cli::Cli;
    ///
    /// let cli = Cli::default();
    /// assert!(cli.account_name.is_none());
    /// assert!(!cli.dry_run);
    /// ```
    fn default() -> Self {
        Self {
            account_name: None,
            service_url: None,
            symbols_folder: None,
            search_pattern: Vec::new(),
            symbol_tool: None,
            dry_run: false,
            verbosity: 0,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
