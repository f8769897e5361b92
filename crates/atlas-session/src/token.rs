//! Structural bearer-token decoding.
//!
//! The client never validates signatures; it only needs the claim set and
//! the expiry. Tokens that fail structural decoding are treated the same
//! as absent credentials by the session layer.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::DateTime;
use serde_json::{Map, Value};

use atlas_core::error::AppError;
use atlas_core::result::AppResult;
use atlas_entity::{ClaimSet, Credential};

/// Decode the payload segment of an encoded bearer token.
///
/// Accepts the standard three-segment `header.payload.signature` shape,
/// base64url-decodes the payload, and parses it as a JSON object. The
/// `exp` claim, when present, becomes the credential expiry.
pub fn decode(raw: &str) -> AppResult<Credential> {
    let segments: Vec<&str> = raw.split('.').collect();
    if segments.len() != 3 {
        return Err(AppError::authentication(format!(
            "malformed token: expected 3 segments, found {}",
            segments.len()
        )));
    }

    let payload = URL_SAFE_NO_PAD
        .decode(segments[1])
        .map_err(|e| AppError::authentication(format!("token payload is not base64url: {e}")))?;

    let claims: Map<String, Value> = serde_json::from_slice(&payload)
        .map_err(|e| AppError::authentication(format!("token payload is not a JSON object: {e}")))?;

    let expires_at = claims
        .get("exp")
        .and_then(Value::as_i64)
        .and_then(|secs| DateTime::from_timestamp(secs, 0));

    Ok(Credential::new(
        raw.to_string(),
        ClaimSet::new(claims),
        expires_at,
    ))
}
