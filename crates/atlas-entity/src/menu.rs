//! Flat menu records as returned by the remote access API.

use serde::{Deserialize, Serialize};

/// A top-level menu record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuRecord {
    /// Stable menu identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Icon name, when the menu has one.
    #[serde(default)]
    pub icon: Option<String>,
    /// Position among sibling menus, ascending.
    pub display_order: i32,
    /// Pages attached directly to this menu.
    #[serde(default)]
    pub pages: Vec<PageRecord>,
    /// Submenus grouping further pages.
    #[serde(default)]
    pub submenus: Vec<SubmenuRecord>,
}

/// A submenu record nested under a menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmenuRecord {
    /// Stable submenu identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Icon name, when the submenu has one.
    #[serde(default)]
    pub icon: Option<String>,
    /// Position among siblings under the parent menu, ascending.
    pub display_order: i32,
    /// Pages grouped under this submenu.
    #[serde(default)]
    pub pages: Vec<PageRecord>,
}

/// A leaf page record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    /// Stable page identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Navigation target URL.
    pub url: String,
    /// Icon name, when the page has one.
    #[serde(default)]
    pub icon: Option<String>,
    /// Position among siblings, ascending.
    pub display_order: i32,
}
