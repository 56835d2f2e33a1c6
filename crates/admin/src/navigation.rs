//! Panel navigation registry.

use crate::resource::Resource;

/// One entry in the panel's navigation sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationItem {
    /// Group heading ("Blog", "Shop").
    pub group: &'static str,
    /// Entry label (the resource's plural label).
    pub label: &'static str,
    /// Icon name.
    pub icon: &'static str,
    /// Sort position within the group.
    pub sort: i32,
    /// Count badge, if the resource computes one.
    pub badge: Option<String>,
    /// Target URL (the resource index page).
    pub url: String,
}

/// Build the navigation entry for a resource.
#[must_use]
pub fn navigation_item<T: Resource>(badge: Option<String>) -> NavigationItem {
    NavigationItem {
        group: T::NAVIGATION_GROUP,
        label: T::plural_model_label(),
        icon: T::NAVIGATION_ICON,
        sort: T::NAVIGATION_SORT,
        badge,
        url: T::pages().index_url(),
    }
}

/// Order navigation entries by group, then by sort position.
#[must_use]
pub fn sorted(mut items: Vec<NavigationItem>) -> Vec<NavigationItem> {
    items.sort_by(|a, b| a.group.cmp(b.group).then(a.sort.cmp(&b.sort)));
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(group: &'static str, label: &'static str, sort: i32) -> NavigationItem {
        NavigationItem {
            group,
            label,
            icon: "heroicon-o-document-text",
            sort,
            badge: None,
            url: format!("/{}", label.to_lowercase()),
        }
    }

    #[test]
    fn test_sorted_groups_then_sort_keys() {
        let items = sorted(vec![
            item("Shop", "Pedidos", 2),
            item("Blog", "Posts", 0),
            item("Shop", "Produtos", 0),
        ]);

        let order: Vec<&str> = items.iter().map(|i| i.label).collect();
        assert_eq!(order, vec!["Posts", "Produtos", "Pedidos"]);
    }
}
