//! Action input resolution.
//!
//! A run is configured from three layers, highest precedence first:
//! command-line flags, GitHub Actions inputs, and built-in defaults. The
//! runner exposes an action input `name` as the environment variable
//! `INPUT_<NAME>`, upper-cased with spaces replaced by underscores. Values
//! are trimmed and an empty value counts as absent.
//!
//! Required inputs are not enforced here; the pipeline validates them so
//! that every failure goes through the same reporting path.

use crate::cli::Cli;
use crate::credential::Credential;
use crate::error::{PublishError, Result};
use crate::host::Host;
use crate::patterns::DEFAULT_SEARCH_PATTERN;
use camino::Utf8PathBuf;
use std::path::PathBuf;

/// Input holding the symbol server account name.
pub const ACCOUNT_NAME: &str = "accountName";
/// Input holding the symbol service base URL.
pub const SYMBOL_SERVICE_URL: &str = "symbolServiceUrl";
/// Input holding the personal access token.
pub const PERSONAL_ACCESS_TOKEN: &str = "personalAccessToken";
/// Input holding the folder the search patterns are rooted at.
pub const SYMBOLS_FOLDER: &str = "SymbolsFolder";
/// Input holding the newline-separated search patterns.
pub const SEARCH_PATTERN: &str = "SearchPattern";

/// Environment variable naming the runner's workspace directory.
const RUNNER_WORKSPACE: &str = "RUNNER_WORKSPACE";
/// Environment variable naming the runner's per-job temporary directory.
const RUNNER_TEMP: &str = "RUNNER_TEMP";

/// Environment variable carrying the action input `name`.
///
/// # Examples
///
/// ```
/// use symbol_publisher::inputs::input_variable;
///
/// assert_eq!(input_variable("accountName"), "INPUT_ACCOUNTNAME");
/// assert_eq!(input_variable("symbols folder"), "INPUT_SYMBOLS_FOLDER");
/// ```
#[must_use]
pub fn input_variable(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// The resolved configuration of one run.
#[derive(Debug, Clone)]
pub struct PublishInputs {
    /// Symbol server account, if supplied.
    pub account_name: Option<String>,
    /// Base URL of the symbol service without a trailing `/`.
    pub service_url: String,
    /// Personal access token, if supplied.
    pub credential: Option<Credential>,
    /// Folder the search patterns are rooted at.
    pub symbols_folder: Utf8PathBuf,
    /// Raw, newline-separated search patterns.
    pub search_pattern: String,
    /// Directory the manifest is created in.
    pub manifest_dir: Utf8PathBuf,
    /// Local symbol client to use instead of downloading one.
    pub symbol_tool: Option<Utf8PathBuf>,
    /// Skip the publish call.
    pub dry_run: bool,
}

impl PublishInputs {
    /// Resolve inputs from `cli` and the process environment.
    ///
    /// # Errors
    ///
    /// See [`PublishInputs::resolve`].
    pub fn from_env(cli: &Cli, host: &mut dyn Host) -> Result<Self> {
        Self::resolve(cli, |name| std::env::var(name).ok(), host)
    }

    /// Resolve inputs from `cli` and an environment lookup.
    ///
    /// The token is registered with `host` as a secret as soon as it is
    /// read, before anything else can log it.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Io`] if the current directory is needed as a
    /// default and cannot be determined, and
    /// [`PublishError::NonUtf8Input`] if a defaulted directory is not valid
    /// UTF-8.
    pub fn resolve(
        cli: &Cli,
        lookup: impl Fn(&str) -> Option<String>,
        host: &mut dyn Host,
    ) -> Result<Self> {
        let input = |name: &str| {
            lookup(&input_variable(name))
                .map(|raw| raw.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let credential = input(PERSONAL_ACCESS_TOKEN).map(Credential::new);
        if let Some(secret) = &credential {
            host.mark_secret(secret);
        }

        let account_name = cli.account_name.clone().or_else(|| input(ACCOUNT_NAME));
        let service_url = cli
            .service_url
            .clone()
            .or_else(|| input(SYMBOL_SERVICE_URL))
            .unwrap_or_default()
            .trim_end_matches('/')
            .to_owned();

        let symbols_folder = cli
            .symbols_folder
            .clone()
            .or_else(|| {
                input(SYMBOLS_FOLDER)
                    .or_else(|| non_empty(lookup(RUNNER_WORKSPACE)))
                    .map(Utf8PathBuf::from)
            })
            .map_or_else(working_directory, Ok)?;

        let search_pattern = cli
            .search_patterns()
            .or_else(|| input(SEARCH_PATTERN))
            .unwrap_or_else(|| DEFAULT_SEARCH_PATTERN.to_owned());

        let manifest_dir = non_empty(lookup(RUNNER_TEMP))
            .map(Utf8PathBuf::from)
            .map_or_else(|| utf8_dir(RUNNER_TEMP, std::env::temp_dir()), Ok)?;

        Ok(Self {
            account_name,
            service_url,
            credential,
            symbols_folder,
            search_pattern,
            manifest_dir,
            symbol_tool: cli.symbol_tool.clone(),
            dry_run: cli.dry_run,
        })
    }

    /// The account name, or an error naming the missing input.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::MissingInput`] when no account was supplied.
    pub fn require_account(&self) -> Result<&str> {
        self.account_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .ok_or(PublishError::MissingInput { name: ACCOUNT_NAME })
    }

    /// The credential, or an error naming the missing input.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::MissingInput`] when no token was supplied.
    pub fn require_credential(&self) -> Result<&Credential> {
        self.credential
            .as_ref()
            .filter(|credential| !credential.expose().is_empty())
            .ok_or(PublishError::MissingInput {
                name: PERSONAL_ACCESS_TOKEN,
            })
    }

    /// Account-qualified service URL for `account`.
    ///
    /// # Examples
    ///
    /// ```
    /// use symbol_publisher::inputs::PublishInputs;
    /// use camino::Utf8PathBuf;
    ///
    /// let inputs = PublishInputs {
    ///     account_name: Some("contoso".to_owned()),
    ///     service_url: "https://artifacts.dev.azure.com".to_owned(),
    ///     credential: None,
    ///     symbols_folder: Utf8PathBuf::from("."),
    ///     search_pattern: String::new(),
    ///     manifest_dir: Utf8PathBuf::from("."),
    ///     symbol_tool: None,
    ///     dry_run: false,
    /// };
    /// assert_eq!(
    ///     inputs.server_url("contoso"),
    ///     "https://artifacts.dev.azure.com/contoso"
    /// );
    /// ```
    #[must_use]
    pub fn server_url(&self, account: &str) -> String {
        format!("{}/{account}", self.service_url)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

fn working_directory() -> Result<Utf8PathBuf> {
    utf8_dir(SYMBOLS_FOLDER, std::env::current_dir()?)
}

fn utf8_dir(name: &'static str, path: PathBuf) -> Result<Utf8PathBuf> {
    Utf8PathBuf::try_from(path).map_err(|e| PublishError::NonUtf8Input {
        name,
        path: e.as_path().display().to_string(),
    })
}

#[cfg(test)]
#[path = "inputs_tests.rs"]
mod tests;
