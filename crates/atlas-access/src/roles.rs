//! Role-family tiers inferred from role names.
//!
//! Tier membership is a naming convention: any role whose name contains
//! a family substring inherits that family's capabilities, so new
//! department roles (e.g. `"FinanceManager"`) pick up a tier without
//! code changes. The convention lives behind [`RoleTierPolicy`] so it
//! can be replaced by explicit tier tagging without touching callers.

use atlas_entity::PagePermissions;

/// The role name granted every capability unconditionally.
pub const SUPER_ADMIN_ROLE: &str = "SuperAdmin";

/// Capability tiers granted by role-family fallback, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleTier {
    /// Any `*Admin*` role except the super admin: all capabilities.
    Admin,
    /// Any `*Manager*` role: view, add, and edit.
    Manager,
    /// Any `*Analyst*` or `*Executive*` role: view and add.
    Analyst,
    /// Any `*Staff*` role: view only.
    Staff,
}

impl RoleTier {
    /// The page capabilities this tier grants.
    pub fn grants(&self) -> PagePermissions {
        match self {
            Self::Admin => PagePermissions::all(),
            Self::Manager => PagePermissions::new(true, true, true, false),
            Self::Analyst => PagePermissions::new(true, true, false, false),
            Self::Staff => PagePermissions::new(true, false, false, false),
        }
    }
}

/// Maps a role set to a capability tier.
pub trait RoleTierPolicy: Send + Sync + std::fmt::Debug + 'static {
    /// Whether the role set contains the super-admin role.
    fn is_super_admin(&self, roles: &[String]) -> bool;

    /// The tier granted by the role set, evaluated in fixed priority
    /// order with the first match winning. `None` when no family
    /// matches.
    fn tier_for(&self, roles: &[String]) -> Option<RoleTier>;
}

/// The substring naming-convention policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameTierPolicy;

impl RoleTierPolicy for NameTierPolicy {
    fn is_super_admin(&self, roles: &[String]) -> bool {
        roles.iter().any(|role| role == SUPER_ADMIN_ROLE)
    }

    fn tier_for(&self, roles: &[String]) -> Option<RoleTier> {
        if roles
            .iter()
            .any(|role| role != SUPER_ADMIN_ROLE && role.contains("Admin"))
        {
            return Some(RoleTier::Admin);
        }
        if roles.iter().any(|role| role.contains("Manager")) {
            return Some(RoleTier::Manager);
        }
        if roles
            .iter()
            .any(|role| role.contains("Analyst") || role.contains("Executive"))
        {
            return Some(RoleTier::Analyst);
        }
        if roles.iter().any(|role| role.contains("Staff")) {
            return Some(RoleTier::Staff);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_super_admin_is_exact_match() {
        let policy = NameTierPolicy;
        assert!(policy.is_super_admin(&roles(&["SuperAdmin"])));
        assert!(!policy.is_super_admin(&roles(&["SystemAdmin"])));
    }

    #[test]
    fn test_tier_priority_first_match_wins() {
        let policy = NameTierPolicy;
        assert_eq!(
            policy.tier_for(&roles(&["SalesStaff", "SystemAdmin"])),
            Some(RoleTier::Admin)
        );
        assert_eq!(
            policy.tier_for(&roles(&["FinanceManager", "DataAnalyst"])),
            Some(RoleTier::Manager)
        );
        assert_eq!(
            policy.tier_for(&roles(&["ChiefExecutive"])),
            Some(RoleTier::Analyst)
        );
        assert_eq!(
            policy.tier_for(&roles(&["WarehouseStaff"])),
            Some(RoleTier::Staff)
        );
        assert_eq!(policy.tier_for(&roles(&["Contractor"])), None);
    }

    #[test]
    fn test_super_admin_does_not_count_toward_admin_tier() {
        let policy = NameTierPolicy;
        assert_eq!(policy.tier_for(&roles(&["SuperAdmin"])), None);
    }

    #[test]
    fn test_tier_grants() {
        assert_eq!(RoleTier::Admin.grants(), PagePermissions::all());
        assert_eq!(
            RoleTier::Manager.grants(),
            PagePermissions::new(true, true, true, false)
        );
        assert_eq!(
            RoleTier::Analyst.grants(),
            PagePermissions::new(true, true, false, false)
        );
        assert_eq!(
            RoleTier::Staff.grants(),
            PagePermissions::new(true, false, false, false)
        );
    }
}
