//! Session change events.

use serde::{Deserialize, Serialize};

/// Events emitted whenever the session's credential or pending
/// verification state changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// The bearer credential was set or removed.
    CredentialChanged {
        /// Whether a valid credential is present after the change.
        authenticated: bool,
    },
    /// The pending two-factor verification record was set or removed.
    VerificationChanged {
        /// Whether a pending verification is present after the change.
        pending: bool,
    },
    /// The whole session was cleared (credential and pending record).
    Cleared,
}
