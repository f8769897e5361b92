//! Navigation tree construction.

use atlas_entity::{MenuRecord, NavigationNode, PageRecord, SubmenuRecord};

/// Build the three-level navigation tree from flat menu records.
///
/// Pure transformation, no I/O. Every level is sorted by the source
/// `display_order`, ascending and stable; submenus and direct pages share
/// level 1 and are sorted together. Only level-0 nodes start expanded.
pub fn build_navigation_tree(menus: &[MenuRecord]) -> Vec<NavigationNode> {
    let mut ordered: Vec<&MenuRecord> = menus.iter().collect();
    ordered.sort_by_key(|menu| menu.display_order);

    ordered.into_iter().map(menu_node).collect()
}

fn menu_node(menu: &MenuRecord) -> NavigationNode {
    let mut children: Vec<(i32, NavigationNode)> = menu
        .submenus
        .iter()
        .map(|submenu| (submenu.display_order, submenu_node(submenu)))
        .collect();
    children.extend(
        menu.pages
            .iter()
            .map(|page| (page.display_order, page_node(page, 1))),
    );
    children.sort_by_key(|(order, _)| *order);

    NavigationNode {
        id: menu.id.clone(),
        title: menu.title.clone(),
        url: None,
        icon: menu.icon.clone(),
        level: 0,
        expanded: true,
        children: children.into_iter().map(|(_, node)| node).collect(),
    }
}

fn submenu_node(submenu: &SubmenuRecord) -> NavigationNode {
    let mut pages: Vec<&PageRecord> = submenu.pages.iter().collect();
    pages.sort_by_key(|page| page.display_order);

    NavigationNode {
        id: submenu.id.clone(),
        title: submenu.title.clone(),
        url: None,
        icon: submenu.icon.clone(),
        level: 1,
        expanded: false,
        children: pages.into_iter().map(|page| page_node(page, 2)).collect(),
    }
}

fn page_node(page: &PageRecord, level: u8) -> NavigationNode {
    NavigationNode {
        id: page.id.clone(),
        title: page.title.clone(),
        url: Some(page.url.clone()),
        icon: page.icon.clone(),
        level,
        expanded: false,
        children: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(id: &str, order: i32) -> PageRecord {
        PageRecord {
            id: id.to_string(),
            title: id.to_string(),
            url: format!("/{id}"),
            icon: None,
            display_order: order,
        }
    }

    fn submenu(id: &str, order: i32, pages: Vec<PageRecord>) -> SubmenuRecord {
        SubmenuRecord {
            id: id.to_string(),
            title: id.to_string(),
            icon: None,
            display_order: order,
            pages,
        }
    }

    fn menu(
        id: &str,
        order: i32,
        pages: Vec<PageRecord>,
        submenus: Vec<SubmenuRecord>,
    ) -> MenuRecord {
        MenuRecord {
            id: id.to_string(),
            title: id.to_string(),
            icon: None,
            display_order: order,
            pages,
            submenus,
        }
    }

    #[test]
    fn test_roots_sorted_by_display_order() {
        let menus = vec![
            menu("c", 3, vec![], vec![]),
            menu("a", 1, vec![], vec![]),
            menu("b", 2, vec![], vec![]),
        ];

        let tree = build_navigation_tree(&menus);
        let ids: Vec<&str> = tree.iter().map(|node| node.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_submenus_and_direct_pages_share_level_one_ordering() {
        let menus = vec![menu(
            "root",
            1,
            vec![page("direct", 2)],
            vec![submenu("grouped", 1, vec![page("leaf", 1)])],
        )];

        let tree = build_navigation_tree(&menus);
        let children: Vec<&str> = tree[0]
            .children
            .iter()
            .map(|node| node.id.as_str())
            .collect();
        assert_eq!(children, vec!["grouped", "direct"]);
        assert!(tree[0].children.iter().all(|node| node.level == 1));
    }

    #[test]
    fn test_levels_and_expansion() {
        let menus = vec![menu(
            "root",
            1,
            vec![],
            vec![submenu("group", 1, vec![page("leaf", 1)])],
        )];

        let tree = build_navigation_tree(&menus);
        let root = &tree[0];
        let group = &root.children[0];
        let leaf = &group.children[0];

        assert_eq!((root.level, root.expanded), (0, true));
        assert_eq!((group.level, group.expanded), (1, false));
        assert_eq!((leaf.level, leaf.expanded), (2, false));
        assert!(leaf.is_leaf());
        assert!(leaf.children.is_empty());
    }

    #[test]
    fn test_stable_order_on_ties() {
        let menus = vec![menu(
            "root",
            1,
            vec![page("p1", 1), page("p2", 1)],
            vec![],
        )];

        let tree = build_navigation_tree(&menus);
        let children: Vec<&str> = tree[0]
            .children
            .iter()
            .map(|node| node.id.as_str())
            .collect();
        assert_eq!(children, vec!["p1", "p2"]);
    }
}
