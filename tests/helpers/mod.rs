//! Shared test helpers for integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use serde_json::json;

use atlas_client::access::{AccessGateway, AccessService};
use atlas_client::core::config::AppConfig;
use atlas_client::core::result::AppResult;
use atlas_client::core::types::Envelope;
use atlas_client::entity::{MenuRecord, PageRecord, SubmenuRecord};
use atlas_client::session::SessionManager;
use atlas_client::store::MemoryStateStore;

/// Test fixture wiring a session, a scripted gateway, and the access
/// service over an in-memory state store.
pub struct TestClient {
    /// The persistent store, shared so tests can simulate restarts.
    pub store: Arc<MemoryStateStore>,
    /// The session state machine.
    pub session: Arc<SessionManager>,
    /// The scripted remote gateway.
    pub gateway: Arc<ScriptedGateway>,
    /// The access service under test.
    pub service: Arc<AccessService>,
}

impl TestClient {
    /// Create a fresh client fixture with default configuration.
    pub fn new() -> Self {
        init_tracing();

        let config = AppConfig::default();
        let store = Arc::new(MemoryStateStore::new());
        let session = Arc::new(SessionManager::new(store.clone(), &config.session));
        let gateway = Arc::new(ScriptedGateway::default());
        let service = AccessService::new(gateway.clone(), session.clone(), &config.cache);

        Self {
            store,
            session,
            gateway,
            service,
        }
    }

    /// Rebuild the session and service over the same persistent store,
    /// simulating a process restart.
    pub fn restart(&self) -> Self {
        let config = AppConfig::default();
        let session = Arc::new(SessionManager::new(self.store.clone(), &config.session));
        let service = AccessService::new(self.gateway.clone(), session.clone(), &config.cache);

        Self {
            store: self.store.clone(),
            session,
            gateway: self.gateway.clone(),
            service,
        }
    }

    /// Sign in with an unsigned token carrying the given email claim.
    pub async fn sign_in(&self, email: &str) {
        self.session
            .set_credential(Some(token_for(email, 3600)))
            .await;
    }
}

/// Build an unsigned bearer token with an email claim and a relative
/// expiry in seconds (negative values produce an already-expired token).
pub fn token_for(email: &str, expires_in_seconds: i64) -> String {
    let claims = json!({
        "email": email,
        "exp": Utc::now().timestamp() + expires_in_seconds,
    });
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes());
    format!("{header}.{payload}.sig")
}

/// Install a test subscriber once; repeated calls are no-ops.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// A scripted [`AccessGateway`] with call counters and adjustable
/// responses.
#[derive(Debug, Default)]
pub struct ScriptedGateway {
    /// Number of menu fetches issued.
    pub menu_calls: AtomicUsize,
    /// Number of role fetches issued.
    pub role_calls: AtomicUsize,
    /// Number of permission-set fetches issued.
    pub permission_calls: AtomicUsize,
    /// When set, every query returns an unsuccessful envelope.
    pub offline: AtomicBool,
    /// Role names returned by `fetch_user_roles`.
    pub roles: StdMutex<Vec<String>>,
    /// Permission names returned by `fetch_user_permissions`.
    pub permissions: StdMutex<Vec<String>>,
}

impl ScriptedGateway {
    fn check_online<T>(&self) -> Option<Envelope<T>> {
        if self.offline.load(Ordering::SeqCst) {
            Some(Envelope::failed("backend offline"))
        } else {
            None
        }
    }
}

/// Menu records with out-of-order display orders, used to verify sorting.
pub fn sample_menus() -> Vec<MenuRecord> {
    vec![
        MenuRecord {
            id: "admin".into(),
            title: "Administration".into(),
            icon: Some("gear".into()),
            display_order: 3,
            pages: vec![],
            submenus: vec![SubmenuRecord {
                id: "admin-users".into(),
                title: "Users".into(),
                icon: None,
                display_order: 1,
                pages: vec![page("user-list", "/admin/users", 1)],
            }],
        },
        MenuRecord {
            id: "sales".into(),
            title: "Sales".into(),
            icon: Some("cart".into()),
            display_order: 1,
            pages: vec![page("orders", "/orders", 2), page("quotes", "/quotes", 1)],
            submenus: vec![],
        },
        MenuRecord {
            id: "inventory".into(),
            title: "Inventory".into(),
            icon: None,
            display_order: 2,
            pages: vec![page("products", "/products", 1)],
            submenus: vec![],
        },
    ]
}

fn page(id: &str, url: &str, order: i32) -> PageRecord {
    PageRecord {
        id: id.to_string(),
        title: id.to_string(),
        url: url.to_string(),
        icon: None,
        display_order: order,
    }
}

#[async_trait]
impl AccessGateway for ScriptedGateway {
    async fn fetch_user_menus(&self) -> AppResult<Envelope<Vec<MenuRecord>>> {
        self.menu_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(failed) = self.check_online() {
            return Ok(failed);
        }
        Ok(Envelope::ok(sample_menus()))
    }

    async fn check_page_access(&self, _page: &str) -> AppResult<Envelope<bool>> {
        if let Some(failed) = self.check_online() {
            return Ok(failed);
        }
        Ok(Envelope::ok(true))
    }

    async fn check_permission(&self, _permission: &str) -> AppResult<Envelope<bool>> {
        if let Some(failed) = self.check_online() {
            return Ok(failed);
        }
        Ok(Envelope::ok(false))
    }

    async fn fetch_user_roles(&self) -> AppResult<Envelope<Vec<String>>> {
        self.role_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(failed) = self.check_online() {
            return Ok(failed);
        }
        Ok(Envelope::ok(self.roles.lock().unwrap().clone()))
    }

    async fn fetch_user_permissions(&self, _email: &str) -> AppResult<Envelope<Vec<String>>> {
        self.permission_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(failed) = self.check_online() {
            return Ok(failed);
        }
        Ok(Envelope::ok(self.permissions.lock().unwrap().clone()))
    }

    async fn fetch_user_department(&self) -> AppResult<Envelope<String>> {
        if let Some(failed) = self.check_online() {
            return Ok(failed);
        }
        Ok(Envelope::ok("Sales".to_string()))
    }
}
