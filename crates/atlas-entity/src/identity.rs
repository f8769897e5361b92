//! Externally visible identity snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::credential::ClaimSet;

/// The externally visible authentication state derived from the current
/// credential.
///
/// Snapshots are memoized by the session manager inside a short freshness
/// window; observers treat them as immutable values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentitySnapshot {
    /// Whether a valid (unexpired, decodable) credential is present.
    pub authenticated: bool,
    /// Claims derived from the credential; empty when anonymous.
    pub claims: ClaimSet,
    /// Credential expiry, when one is present.
    pub expires_at: Option<DateTime<Utc>>,
}

impl IdentitySnapshot {
    /// The anonymous snapshot: no claims, not authenticated.
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            claims: ClaimSet::default(),
            expires_at: None,
        }
    }

    /// A snapshot for an authenticated identity.
    pub fn authenticated(claims: ClaimSet, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            authenticated: true,
            claims,
            expires_at,
        }
    }

    /// Look up a claim by name on this snapshot.
    pub fn find_claim(&self, name: &str) -> Option<String> {
        self.claims.find(name)
    }
}
