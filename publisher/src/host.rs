//! CI host integration.
//!
//! The publisher reports progress, masks secrets, and signals failure
//! through the [`Host`] trait. [`WorkflowCommands`] implements it for GitHub
//! Actions by emitting workflow commands on standard output; tests use a
//! recording double instead.

use crate::credential::Credential;
use std::io::Write;

/// Operations the CI host provides to a run.
pub trait Host {
    /// Report an informational message.
    fn info(&mut self, message: &str);

    /// Report a warning that does not fail the run.
    fn warning(&mut self, message: &str);

    /// Report an error.
    fn error(&mut self, message: &str);

    /// Ask the host to redact `secret` from all subsequent output.
    fn mark_secret(&mut self, secret: &Credential);

    /// Report the terminal failure of the run.
    ///
    /// The default implementation reports `message` as an error; the binary
    /// turns the failed outcome into a non-zero exit code.
    fn set_failed(&mut self, message: &str) {
        self.error(message);
    }
}

/// GitHub Actions workflow-command writer.
///
/// # Examples
///
/// ```
/// use symbol_publisher::host::{Host, WorkflowCommands};
///
/// let mut host = WorkflowCommands::new(Vec::new());
/// host.warning("No files present in match list");
/// let output = String::from_utf8(host.into_inner()).expect("UTF-8 output");
/// assert_eq!(output, "::warning::No files present in match list\n");
/// ```
#[derive(Debug)]
pub struct WorkflowCommands<W> {
    out: W,
}

impl<W: Write> WorkflowCommands<W> {
    /// Wrap the writer that the runner reads commands from.
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Return the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn command(&mut self, name: &str, data: &str) {
        let line = format!("::{name}::{}", escape_data(data));
        self.line(&line);
    }

    fn line(&mut self, text: &str) {
        if writeln!(self.out, "{text}").is_err() {
            // Best-effort output; the runner may have closed the pipe.
        }
    }
}

impl WorkflowCommands<std::io::Stdout> {
    /// Writer bound to the process's standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> Host for WorkflowCommands<W> {
    fn info(&mut self, message: &str) {
        self.line(&escape_line_breaks(message));
    }

    fn warning(&mut self, message: &str) {
        self.command("warning", message);
    }

    fn error(&mut self, message: &str) {
        self.command("error", message);
    }

    fn mark_secret(&mut self, secret: &Credential) {
        self.command("add-mask", secret.expose());
    }
}

/// Escape command data so that line breaks and `%` survive the runner's
/// command parser.
#[must_use]
pub fn escape_data(data: &str) -> String {
    escape_line_breaks(&data.replace('%', "%25"))
}

/// Keep `text` on a single output line so that no part of it can be read
/// as a workflow command.
fn escape_line_breaks(text: &str) -> String {
    text.replace('\r', "%0D").replace('\n', "%0A")
}
