//! Per-page CRUD capability flags.

use serde::{Deserialize, Serialize};

/// The four capability flags resolved for a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagePermissions {
    /// Whether the page may be viewed.
    pub can_view: bool,
    /// Whether records may be added on the page.
    pub can_add: bool,
    /// Whether records may be edited on the page.
    pub can_edit: bool,
    /// Whether records may be deleted on the page.
    pub can_delete: bool,
}

impl PagePermissions {
    /// Build a permission set from explicit flags.
    pub const fn new(can_view: bool, can_add: bool, can_edit: bool, can_delete: bool) -> Self {
        Self {
            can_view,
            can_add,
            can_edit,
            can_delete,
        }
    }

    /// All four capabilities granted.
    pub const fn all() -> Self {
        Self::new(true, true, true, true)
    }

    /// No capability granted.
    pub const fn none() -> Self {
        Self::new(false, false, false, false)
    }
}
