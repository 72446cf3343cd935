//! Symbol request naming.
//!
//! Every publish attempt gets a request name that an operator can trace back
//! to the workflow run that produced it. The name combines the run context
//! with a random token, so two runs with identical context still produce
//! distinct names.

use std::fmt;
use uuid::Uuid;

/// Workflow run identifiers used to build a request name.
///
/// Read once at start-up and passed explicitly, so naming never consults
/// the process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunContext {
    /// Repository in `owner/name` form.
    pub repository: String,
    /// Workflow name.
    pub workflow: String,
    /// Sequential run number of the workflow.
    pub run_number: String,
    /// Unique run identifier.
    pub run_id: String,
}

impl RunContext {
    /// Read the context from the GitHub Actions environment variables.
    ///
    /// Missing variables become empty strings.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the context from an arbitrary variable lookup.
    ///
    /// # Examples
    ///
    /// ```
    /// use symbol_publisher::naming::RunContext;
    ///
    /// let context = RunContext::from_lookup(|name| match name {
    ///     "GITHUB_REPOSITORY" => Some("octo/app".to_owned()),
    ///     _ => None,
    /// });
    /// assert_eq!(context.repository, "octo/app");
    /// assert!(context.run_id.is_empty());
    /// ```
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| lookup(name).unwrap_or_default();
        Self {
            repository: read("GITHUB_REPOSITORY"),
            workflow: read("GITHUB_WORKFLOW"),
            run_number: read("GITHUB_RUN_NUMBER"),
            run_id: read("GITHUB_RUN_ID"),
        }
    }
}

/// A lowercase, slash-delimited symbol request name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestName(String);

impl RequestName {
    /// Build a fresh request name for `context`.
    #[must_use]
    pub fn generate(context: &RunContext) -> Self {
        Self::with_token(context, Uuid::new_v4())
    }

    /// Build a request name using a caller-supplied token.
    ///
    /// # Examples
    ///
    /// ```
    /// use symbol_publisher::naming::{RequestName, RunContext};
    /// use uuid::Uuid;
    ///
    /// let context = RunContext {
    ///     repository: "Octo/App".to_owned(),
    ///     workflow: "CI".to_owned(),
    ///     run_number: "7".to_owned(),
    ///     run_id: "123".to_owned(),
    /// };
    /// let name = RequestName::with_token(&context, Uuid::nil());
    /// assert_eq!(
    ///     name.as_str(),
    ///     "octo/app/ci/7/123/00000000-0000-0000-0000-000000000000"
    /// );
    /// ```
    #[must_use]
    pub fn with_token(context: &RunContext, token: Uuid) -> Self {
        let name = format!(
            "{}/{}/{}/{}/{}",
            context.repository,
            context.workflow,
            context.run_number,
            context.run_id,
            token.hyphenated()
        );
        Self(name.to_lowercase())
    }

    /// Get the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RequestName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
