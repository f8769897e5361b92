//! Navigation tree node.

use serde::{Deserialize, Serialize};

/// A node in the three-level navigation tree (menu → submenu-or-page →
/// page).
///
/// Children are ordered by the source display-order, ascending. The level
/// increases by exactly one per depth and leaf pages never have children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationNode {
    /// Stable identifier carried over from the source record.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Navigation target; `None` for grouping nodes.
    pub url: Option<String>,
    /// Icon name, when the source record has one.
    pub icon: Option<String>,
    /// Structural depth: 0 = menu, 1 = submenu or direct page, 2 = page.
    pub level: u8,
    /// Whether the node starts expanded. True only at level 0.
    pub expanded: bool,
    /// Ordered child nodes.
    #[serde(default)]
    pub children: Vec<NavigationNode>,
}

impl NavigationNode {
    /// Whether this node is a leaf (navigable page).
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty() && self.url.is_some()
    }
}
