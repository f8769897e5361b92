//! Pending two-factor verification record.

use serde::{Deserialize, Serialize};

/// The record produced by a first-factor login that requires a second
/// factor before a credential is issued.
///
/// The three fields are all-or-nothing: the session layer persists the
/// whole record as one serialized value, so a partial triple is never
/// observable across restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingVerification {
    /// The identifier the first factor was performed with (e.g. an email).
    pub identifier: String,
    /// Opaque challenge token to present with the second factor.
    pub challenge_token: String,
    /// The verification channel (e.g. `"totp"`, `"sms"`).
    pub channel: String,
}

impl PendingVerification {
    /// Build a pending verification record.
    pub fn new(
        identifier: impl Into<String>,
        challenge_token: impl Into<String>,
        channel: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            challenge_token: challenge_token.into(),
            channel: channel.into(),
        }
    }

    /// Whether the record is actionable: identifier and challenge token
    /// are both non-empty.
    pub fn is_actionable(&self) -> bool {
        !self.identifier.is_empty() && !self.challenge_token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actionable_requires_identifier_and_token() {
        assert!(PendingVerification::new("a@x.com", "t1", "totp").is_actionable());
        assert!(!PendingVerification::new("", "t1", "totp").is_actionable());
        assert!(!PendingVerification::new("a@x.com", "", "totp").is_actionable());
    }
}
