//! Shared test utilities for the publisher crate.

use crate::credential::Credential;
use crate::host::Host;
use crate::publish::{PublishFailure, Publisher, SymbolRequest};
use std::cell::RefCell;
use std::process::{ExitStatus, Output};

/// Creates an `ExitStatus` from an exit code (Unix implementation).
#[cfg(unix)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;

    ExitStatus::from_raw(code << 8)
}

/// Creates an `ExitStatus` from an exit code (Windows implementation).
#[cfg(windows)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;

    ExitStatus::from_raw(code as u32)
}

/// Creates a command `Output` with the given exit code and captured streams.
#[must_use]
pub fn output_with(code: i32, stdout: &str, stderr: &str) -> Output {
    Output {
        status: exit_status(code),
        stdout: stdout.as_bytes().to_vec(),
        stderr: stderr.as_bytes().to_vec(),
    }
}

/// Something a [`RecordingHost`] was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// An informational message.
    Info(String),
    /// A warning.
    Warning(String),
    /// An error.
    Error(String),
    /// A secret registration, holding the raw secret.
    Secret(String),
    /// The terminal failure signal.
    Failed(String),
}

/// A [`Host`] that records every call in order.
#[derive(Debug, Default)]
pub struct RecordingHost {
    /// Events in the order they were reported.
    pub events: Vec<HostEvent>,
}

impl RecordingHost {
    /// Informational messages in order.
    #[must_use]
    pub fn infos(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                HostEvent::Info(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Warnings in order.
    #[must_use]
    pub fn warnings(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                HostEvent::Warning(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The failure message, if the run was failed.
    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        self.events.iter().find_map(|event| match event {
            HostEvent::Failed(message) => Some(message.as_str()),
            _ => None,
        })
    }

    /// Whether any non-secret event contains `needle`.
    #[must_use]
    pub fn output_contains(&self, needle: &str) -> bool {
        self.events.iter().any(|event| match event {
            HostEvent::Info(message)
            | HostEvent::Warning(message)
            | HostEvent::Error(message)
            | HostEvent::Failed(message) => message.contains(needle),
            HostEvent::Secret(_) => false,
        })
    }
}

impl Host for RecordingHost {
    fn info(&mut self, message: &str) {
        self.events.push(HostEvent::Info(message.to_owned()));
    }

    fn warning(&mut self, message: &str) {
        self.events.push(HostEvent::Warning(message.to_owned()));
    }

    fn error(&mut self, message: &str) {
        self.events.push(HostEvent::Error(message.to_owned()));
    }

    fn mark_secret(&mut self, secret: &Credential) {
        self.events
            .push(HostEvent::Secret(secret.expose().to_owned()));
    }

    fn set_failed(&mut self, message: &str) {
        self.events.push(HostEvent::Failed(message.to_owned()));
    }
}

/// What a [`RecordingPublisher`] saw for one call.
#[derive(Debug, Clone)]
pub struct RecordedPublish {
    /// The request as submitted.
    pub request: SymbolRequest,
    /// Whether the manifest existed when the call was made.
    pub manifest_existed: bool,
    /// Manifest contents read at call time.
    pub manifest_contents: String,
}

/// A [`Publisher`] that records requests and optionally fails.
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    calls: RefCell<Vec<RecordedPublish>>,
    rejection: Option<String>,
}

impl RecordingPublisher {
    /// A publisher that accepts every request.
    #[must_use]
    pub fn accepting() -> Self {
        Self::default()
    }

    /// A publisher that rejects every request with `reason`.
    #[must_use]
    pub fn rejecting(reason: &str) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            rejection: Some(reason.to_owned()),
        }
    }

    /// Calls received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedPublish> {
        self.calls.borrow().clone()
    }
}

impl Publisher for RecordingPublisher {
    fn publish(&self, request: &SymbolRequest) -> Result<(), PublishFailure> {
        let manifest_existed = request.manifest_path.is_file();
        let manifest_contents =
            std::fs::read_to_string(&request.manifest_path).unwrap_or_default();
        self.calls.borrow_mut().push(RecordedPublish {
            request: request.clone(),
            manifest_existed,
            manifest_contents,
        });

        self.rejection.as_ref().map_or(Ok(()), |reason| {
            Err(PublishFailure::ToolFailed {
                status: "exit status: 1".to_owned(),
                message: reason.clone(),
            })
        })
    }
}
