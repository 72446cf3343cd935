//! External command execution.
//!
//! The symbol client is a separate executable. Running it through the
//! [`CommandExecutor`] trait keeps the publish logic testable without
//! spawning processes.

use camino::Utf8Path;
use std::io;
use std::process::{Command, Output};

/// Abstraction for running external commands.
#[cfg_attr(test, mockall::automock)]
pub trait CommandExecutor {
    /// Runs `program` with `args` and the extra environment variables in
    /// `envs`, returning the captured output.
    ///
    /// # Errors
    ///
    /// Returns any I/O error encountered while spawning or waiting for the
    /// command.
    fn run(
        &self,
        program: &Utf8Path,
        args: &[String],
        envs: &[(String, String)],
    ) -> io::Result<Output>;
}

/// Executes commands on the host system.
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8Path;
/// use symbol_publisher::exec::{CommandExecutor, SystemCommandExecutor};
///
/// let executor = SystemCommandExecutor;
/// let output = executor.run(Utf8Path::new("symbol"), &["help".to_owned()], &[])?;
/// assert!(output.status.success());
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandExecutor;

impl CommandExecutor for SystemCommandExecutor {
    fn run(
        &self,
        program: &Utf8Path,
        args: &[String],
        envs: &[(String, String)],
    ) -> io::Result<Output> {
        Command::new(program)
            .args(args)
            .envs(envs.iter().map(|(key, value)| (key, value)))
            .output()
    }
}
