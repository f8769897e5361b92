//! Token-bearing session capability.

use async_trait::async_trait;

/// Capability trait for anything that can supply the current bearer
/// credential.
///
/// The outgoing-request decorator asks this trait for a token string
/// immediately before each outbound request instead of inspecting the
/// concrete session type.
#[async_trait]
pub trait TokenBearer: Send + Sync + 'static {
    /// The current bearer token, or `None` when the session is anonymous
    /// or the credential has expired.
    async fn bearer_token(&self) -> Option<String>;
}
