//! Secret credential wrapper.
//!
//! The personal access token must never reach a log line. [`Credential`]
//! has no `Display` implementation and a redacting `Debug`, so the only way
//! to get at the raw value is an explicit [`Credential::expose`] call.

use std::fmt;

/// An opaque secret such as a personal access token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a secret value.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Borrow the raw secret.
    ///
    /// Call sites should hand the value straight to the consumer that needs
    /// it (an HTTP header, a child process environment) and nowhere else.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}
