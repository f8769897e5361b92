//! HTTP implementation of the access gateway.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::warn;

use atlas_core::config::api::ApiConfig;
use atlas_core::error::AppError;
use atlas_core::result::AppResult;
use atlas_core::traits::TokenBearer;
use atlas_core::types::Envelope;
use atlas_entity::MenuRecord;

use super::AccessGateway;

/// [`AccessGateway`] over HTTP.
///
/// Asks the [`TokenBearer`] for the current credential immediately before
/// each request and attaches it as a bearer token when present. A 401
/// response is logged for diagnostics only; no retry or credential
/// refresh happens here.
pub struct HttpAccessGateway {
    client: reqwest::Client,
    base_url: String,
    bearer: Arc<dyn TokenBearer>,
}

impl std::fmt::Debug for HttpAccessGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpAccessGateway")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl HttpAccessGateway {
    /// Create a gateway from API configuration and a token source.
    pub fn new(config: &ApiConfig, bearer: Arc<dyn TokenBearer>) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bearer,
        })
    }

    /// Issue a GET request and decode the response envelope.
    async fn get_envelope<T: DeserializeOwned + Default>(&self, path: &str) -> AppResult<Envelope<T>> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        let mut request = self.client.get(&url);
        if let Some(token) = self.bearer.bearer_token().await {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::external_service(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            warn!(%url, "remote rejected the bearer credential (401)");
        }
        if !status.is_success() {
            return Err(AppError::external_service(format!(
                "{url} returned HTTP {status}"
            )));
        }

        response.json::<Envelope<T>>().await.map_err(|e| {
            AppError::serialization(format!("failed to decode envelope from {url}: {e}"))
        })
    }
}

#[async_trait]
impl AccessGateway for HttpAccessGateway {
    async fn fetch_user_menus(&self) -> AppResult<Envelope<Vec<MenuRecord>>> {
        self.get_envelope("api/access/menus").await
    }

    async fn check_page_access(&self, page: &str) -> AppResult<Envelope<bool>> {
        self.get_envelope(&format!("api/access/pages/{page}/allowed"))
            .await
    }

    async fn check_permission(&self, permission: &str) -> AppResult<Envelope<bool>> {
        self.get_envelope(&format!("api/access/permissions/{permission}/granted"))
            .await
    }

    async fn fetch_user_roles(&self) -> AppResult<Envelope<Vec<String>>> {
        self.get_envelope("api/access/roles").await
    }

    async fn fetch_user_permissions(&self, email: &str) -> AppResult<Envelope<Vec<String>>> {
        self.get_envelope(&format!("api/access/permissions?email={email}"))
            .await
    }

    async fn fetch_user_department(&self) -> AppResult<Envelope<String>> {
        self.get_envelope("api/access/department").await
    }
}
