//! Bearer credential and decoded claim set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The claims decoded from a bearer credential, in source order.
///
/// Keys map to arbitrary JSON values; [`ClaimSet::find`] renders scalar
/// claims as strings and [`ClaimSet::values`] expands array claims.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimSet(Map<String, Value>);

impl ClaimSet {
    /// Wrap a decoded claims object.
    pub fn new(claims: Map<String, Value>) -> Self {
        Self(claims)
    }

    /// Whether the set contains no claims.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of claims in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Look up a claim by name and render it as a string.
    ///
    /// String claims are returned as-is; other non-null values are
    /// JSON-encoded. Missing and null claims return `None`.
    pub fn find(&self, name: &str) -> Option<String> {
        match self.0.get(name)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Expand a claim into its string values.
    ///
    /// Array claims yield one entry per element; scalar claims yield a
    /// single entry; missing claims yield an empty vector.
    pub fn values(&self, name: &str) -> Vec<String> {
        match self.0.get(name) {
            Some(Value::Array(items)) => items.iter().filter_map(render).collect(),
            Some(value) => render(value).into_iter().collect(),
            None => Vec::new(),
        }
    }

    /// Iterate over the claims in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

fn render(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// A decoded bearer credential.
///
/// Holds the raw encoded token alongside its derived claim set and
/// expiry. A credential is valid only while `expires_at > now`; expired
/// and undecodable credentials are treated identically to "absent" by
/// the session layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    /// The raw encoded token string.
    raw: String,
    /// Claims decoded from the token payload, in source order.
    claims: ClaimSet,
    /// Expiry timestamp derived from the `exp` claim (`None` = no expiry).
    expires_at: Option<DateTime<Utc>>,
}

impl Credential {
    /// Build a credential from its decoded parts.
    pub fn new(raw: String, claims: ClaimSet, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            raw,
            claims,
            expires_at,
        }
    }

    /// The raw encoded token string.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The decoded claim set.
    pub fn claims(&self) -> &ClaimSet {
        &self.claims
    }

    /// The expiry timestamp, if the token carries one.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Check if this credential has expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at.map(|exp| exp <= Utc::now()).unwrap_or(false)
    }
}
