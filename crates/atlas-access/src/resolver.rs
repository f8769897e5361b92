//! Per-page permission resolution.

use std::collections::HashSet;

use atlas_entity::PagePermissions;

use crate::roles::{NameTierPolicy, RoleTierPolicy};

/// Resolves a flat permission/role set into per-page capability flags.
///
/// Resolution order:
/// 1. Super-admin role: every flag true, terminal.
/// 2. Explicit permission names, each flag independently. A flag matches
///    when the set contains any of `"{page}.{action}"` (page lowercased),
///    `"{action}{page}"`, or the bare action name, compared
///    case-insensitively. Add accepts `add`/`create`, edit accepts
///    `edit`/`update`.
/// 3. Role-family fallback via [`RoleTierPolicy`], first match wins. A
///    matching tier **overwrites** step 2's flags; it is not merged.
#[derive(Debug)]
pub struct PermissionResolver {
    policy: Box<dyn RoleTierPolicy>,
}

impl PermissionResolver {
    /// Create a resolver with the substring naming-convention policy.
    pub fn new() -> Self {
        Self::with_policy(Box::new(NameTierPolicy))
    }

    /// Create a resolver with a custom role-tier policy.
    pub fn with_policy(policy: Box<dyn RoleTierPolicy>) -> Self {
        Self { policy }
    }

    /// Resolve the capability flags for `page`.
    pub fn resolve(
        &self,
        permissions: &[String],
        roles: &[String],
        page: &str,
    ) -> PagePermissions {
        if self.policy.is_super_admin(roles) {
            return PagePermissions::all();
        }

        let lowered: HashSet<String> = permissions
            .iter()
            .map(|name| name.to_lowercase())
            .collect();
        let page = page.to_lowercase();

        let explicit = PagePermissions {
            can_view: matches_any(&lowered, &page, &["view"]),
            can_add: matches_any(&lowered, &page, &["add", "create"]),
            can_edit: matches_any(&lowered, &page, &["edit", "update"]),
            can_delete: matches_any(&lowered, &page, &["delete"]),
        };

        match self.policy.tier_for(roles) {
            Some(tier) => tier.grants(),
            None => explicit,
        }
    }
}

impl Default for PermissionResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Check the three naming conventions for each action alias.
fn matches_any(permissions: &HashSet<String>, page: &str, aliases: &[&str]) -> bool {
    aliases.iter().any(|alias| {
        permissions.contains(&format!("{page}.{alias}"))
            || permissions.contains(&format!("{alias}{page}"))
            || permissions.contains(*alias)
    })
}
