//! Access service composing the gateway, the single-flight caches, and
//! the session.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use atlas_cache::{SingleFlight, keys};
use atlas_core::config::cache::CacheConfig;
use atlas_core::error::AppError;
use atlas_core::result::AppResult;
use atlas_entity::{MenuRecord, NavigationNode, PagePermissions};
use atlas_session::SessionManager;

use crate::gateway::AccessGateway;
use crate::navigation::build_navigation_tree;
use crate::resolver::PermissionResolver;

/// Claim consulted for the user-scoped cache keys and the remote
/// permission lookup.
const EMAIL_CLAIM: &str = "email";
/// Claim consulted before falling back to the remote department query.
const DEPARTMENT_CLAIM: &str = "Department";
/// Cache-key user segment when no email claim is present.
const ANONYMOUS_USER: &str = "anonymous";

/// Coordinates menu, navigation, role, and permission retrieval.
///
/// Every remote resource goes through a [`SingleFlight`] cache keyed by
/// the signed-in user. Failures degrade to empty fallbacks and leave the
/// cache unpopulated so the next call retries. The service subscribes to
/// session change notifications and drops all caches synchronously on
/// any transition, so a permission check immediately after a credential
/// change never sees the previous identity's data.
#[derive(Debug)]
pub struct AccessService {
    gateway: Arc<dyn AccessGateway>,
    session: Arc<SessionManager>,
    resolver: PermissionResolver,
    menus: SingleFlight<Vec<MenuRecord>>,
    tree: SingleFlight<Vec<NavigationNode>>,
    roles: SingleFlight<Vec<String>>,
    permissions: SingleFlight<Vec<String>>,
    menu_ttl: Duration,
    navigation_ttl: Duration,
    role_ttl: Duration,
    permission_ttl: Duration,
}

impl AccessService {
    /// Create the service and subscribe it to session changes.
    pub fn new(
        gateway: Arc<dyn AccessGateway>,
        session: Arc<SessionManager>,
        config: &CacheConfig,
    ) -> Arc<Self> {
        let service = Arc::new(Self {
            gateway,
            session: session.clone(),
            resolver: PermissionResolver::new(),
            menus: SingleFlight::new(),
            tree: SingleFlight::new(),
            roles: SingleFlight::new(),
            permissions: SingleFlight::new(),
            menu_ttl: Duration::from_secs(config.menu_ttl_seconds),
            navigation_ttl: Duration::from_secs(config.navigation_ttl_seconds),
            role_ttl: Duration::from_secs(config.role_ttl_seconds),
            permission_ttl: Duration::from_secs(config.permission_ttl_seconds),
        });

        let weak = Arc::downgrade(&service);
        session.subscribe(move |event| {
            if let Some(service) = weak.upgrade() {
                debug!(?event, "session changed; dropping access caches");
                service.invalidate_caches();
            }
        });

        service
    }

    /// The user's menu records. Empty on failure.
    pub async fn menus(&self) -> Vec<MenuRecord> {
        let user = self.cache_user().await;
        self.menus_cached(&user).await.unwrap_or_default()
    }

    /// The user's navigation tree, built from the cached menu records.
    /// Empty on failure.
    pub async fn navigation_tree(&self) -> Vec<NavigationNode> {
        let user = self.cache_user().await;
        let menus_cache = self.menus.clone();
        let menu_key = keys::menu_list(&user);
        let menu_ttl = self.menu_ttl;
        let gateway = Arc::clone(&self.gateway);

        self.tree
            .get_or_fetch(
                &keys::navigation_tree(&user),
                self.navigation_ttl,
                move || async move {
                    let records = menus_cache
                        .get_or_fetch(&menu_key, menu_ttl, move || fetch_menu_records(gateway))
                        .await
                        .ok_or_else(|| {
                            AppError::external_service(
                                "menu list unavailable; navigation tree not built",
                            )
                        })?;
                    Ok(build_navigation_tree(&records))
                },
            )
            .await
            .unwrap_or_default()
    }

    /// Resolve the capability flags for a page.
    ///
    /// Anonymous sessions resolve to no capabilities without touching the
    /// remote API.
    pub async fn page_permissions(&self, page: &str) -> PagePermissions {
        let snapshot = self.session.authentication_state().await;
        if !snapshot.authenticated {
            return PagePermissions::none();
        }

        let email = snapshot.find_claim(EMAIL_CLAIM);
        let user = email
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_else(|| ANONYMOUS_USER.to_string());

        let roles = self.roles_cached(&user).await.unwrap_or_default();
        let permissions = match email {
            Some(email) => self
                .permissions_cached(&user, &email)
                .await
                .unwrap_or_default(),
            None => Vec::new(),
        };

        self.resolver.resolve(&permissions, &roles, page)
    }

    /// Ask the remote API whether the user may access a page. Denied on
    /// failure.
    pub async fn can_access_page(&self, page: &str) -> bool {
        match self.gateway.check_page_access(page).await {
            Ok(envelope) => envelope.into_data().unwrap_or(false),
            Err(error) => {
                warn!(page, %error, "page access check failed; treating as denied");
                false
            }
        }
    }

    /// Ask the remote API whether the user holds a named permission.
    /// Denied on failure.
    pub async fn has_permission(&self, permission: &str) -> bool {
        match self.gateway.check_permission(permission).await {
            Ok(envelope) => envelope.into_data().unwrap_or(false),
            Err(error) => {
                warn!(permission, %error, "permission check failed; treating as denied");
                false
            }
        }
    }

    /// The user's department: the `Department` claim when present,
    /// otherwise the remote lookup. `None` on failure.
    pub async fn department(&self) -> Option<String> {
        if let Some(department) = self.session.find_claim(DEPARTMENT_CLAIM).await {
            return Some(department);
        }

        match self.gateway.fetch_user_department().await {
            Ok(envelope) => envelope.into_data(),
            Err(error) => {
                warn!(%error, "department lookup failed");
                None
            }
        }
    }

    /// Drop every cached resource.
    pub fn invalidate_caches(&self) {
        self.menus.clear();
        self.tree.clear();
        self.roles.clear();
        self.permissions.clear();
    }

    /// The cache-key user segment for the current session.
    async fn cache_user(&self) -> String {
        self.session
            .find_claim(EMAIL_CLAIM)
            .await
            .map(|email| email.to_lowercase())
            .unwrap_or_else(|| ANONYMOUS_USER.to_string())
    }

    async fn menus_cached(&self, user: &str) -> Option<Vec<MenuRecord>> {
        let gateway = Arc::clone(&self.gateway);
        self.menus
            .get_or_fetch(&keys::menu_list(user), self.menu_ttl, move || {
                fetch_menu_records(gateway)
            })
            .await
    }

    async fn roles_cached(&self, user: &str) -> Option<Vec<String>> {
        let gateway = Arc::clone(&self.gateway);
        self.roles
            .get_or_fetch(&keys::role_set(user), self.role_ttl, move || async move {
                gateway.fetch_user_roles().await?.into_result("role set")
            })
            .await
    }

    async fn permissions_cached(&self, user: &str, email: &str) -> Option<Vec<String>> {
        let gateway = Arc::clone(&self.gateway);
        let email = email.to_string();
        self.permissions
            .get_or_fetch(
                &keys::permission_set(user),
                self.permission_ttl,
                move || async move {
                    gateway
                        .fetch_user_permissions(&email)
                        .await?
                        .into_result("permission set")
                },
            )
            .await
    }
}

async fn fetch_menu_records(gateway: Arc<dyn AccessGateway>) -> AppResult<Vec<MenuRecord>> {
    gateway.fetch_user_menus().await?.into_result("menu list")
}
