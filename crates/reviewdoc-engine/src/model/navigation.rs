use serde::{Deserialize, Serialize};

/// An entry in the document's navigation sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NavigationNode {
    #[serde(rename = "Text")]
    pub display_name: String,
    pub navigation_id: String,
    #[serde(default, rename = "ChildItems")]
    pub children: Vec<NavigationNode>,
}

impl NavigationNode {
    pub fn new(display_name: impl Into<String>, navigation_id: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            navigation_id: navigation_id.into(),
            children: Vec::new(),
        }
    }
}

/// Sorts sibling nodes alphabetically at every level. Equal names fall back to
/// the navigation ID so the order never depends on input order.
pub fn sort_nodes(nodes: &mut [NavigationNode]) {
    nodes.sort_by(|a, b| {
        a.display_name
            .cmp(&b.display_name)
            .then_with(|| a.navigation_id.cmp(&b.navigation_id))
    });
    for node in nodes.iter_mut() {
        sort_nodes(&mut node.children);
    }
}
