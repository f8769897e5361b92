//! Cache key builders for all Atlas client cache entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the client uses. Keys are scoped by the signed-in
//! user so a session change never reads another identity's data.

/// Prefix applied to all Atlas cache keys.
const PREFIX: &str = "atlas";

/// Cache key for the menu list of a user.
pub fn menu_list(user: &str) -> String {
    format!("{PREFIX}:menus:{}", user.to_lowercase())
}

/// Cache key for the navigation tree of a user.
pub fn navigation_tree(user: &str) -> String {
    format!("{PREFIX}:nav:{}", user.to_lowercase())
}

/// Cache key for the role set of a user.
pub fn role_set(user: &str) -> String {
    format!("{PREFIX}:roles:{}", user.to_lowercase())
}

/// Cache key for the permission set of a user.
pub fn permission_set(user: &str) -> String {
    format!("{PREFIX}:perms:{}", user.to_lowercase())
}
