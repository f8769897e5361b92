//! Remote access API gateway.
//!
//! The remote identity/RBAC/menu service is opaque to this layer: every
//! query returns a `{ success, data, message }` envelope. The trait is
//! implemented over HTTP in [`http`] and by scripted fakes in tests.

pub mod http;

use async_trait::async_trait;

use atlas_core::result::AppResult;
use atlas_core::types::Envelope;
use atlas_entity::MenuRecord;

pub use http::HttpAccessGateway;

/// The queries this layer issues against the remote access API.
///
/// Transport failures surface as errors; unsuccessful envelopes are
/// returned as-is. Callers convert both into per-resource fallbacks.
#[async_trait]
pub trait AccessGateway: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch the menu records visible to the current user.
    async fn fetch_user_menus(&self) -> AppResult<Envelope<Vec<MenuRecord>>>;

    /// Check whether the current user may access a page.
    async fn check_page_access(&self, page: &str) -> AppResult<Envelope<bool>>;

    /// Check whether the current user holds a named permission.
    async fn check_permission(&self, permission: &str) -> AppResult<Envelope<bool>>;

    /// Fetch the current user's role names.
    async fn fetch_user_roles(&self) -> AppResult<Envelope<Vec<String>>>;

    /// Fetch the permission names granted to a user, looked up by email.
    async fn fetch_user_permissions(&self, email: &str) -> AppResult<Envelope<Vec<String>>>;

    /// Fetch the current user's department name.
    async fn fetch_user_department(&self) -> AppResult<Envelope<String>>;
}
