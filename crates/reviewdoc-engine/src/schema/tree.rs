use std::collections::HashMap;

use crate::model::NavigationNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct NavIndex(usize);

#[derive(Debug)]
struct NavEntry {
    text: String,
    navigation_id: String,
    parent: Option<NavIndex>,
    children: Vec<NavIndex>,
    by_name: HashMap<String, NavIndex>,
}

/// Navigation nodes collected while walking a schema. Children keep the order
/// the walk found them in and are unique by display name.
#[derive(Debug)]
pub(super) struct NavTree {
    entries: Vec<NavEntry>,
}

impl NavTree {
    pub fn new() -> Self {
        Self {
            entries: vec![NavEntry {
                text: String::new(),
                navigation_id: String::new(),
                parent: None,
                children: Vec::new(),
                by_name: HashMap::new(),
            }],
        }
    }

    pub fn root(&self) -> NavIndex {
        NavIndex(0)
    }

    /// Returns the child of `parent` called `text`, adding it if needed.
    pub fn add(&mut self, parent: NavIndex, text: &str, navigation_id: &str) -> NavIndex {
        if let Some(&existing) = self.entries[parent.0].by_name.get(text) {
            return existing;
        }
        let index = NavIndex(self.entries.len());
        self.entries.push(NavEntry {
            text: text.to_string(),
            navigation_id: navigation_id.to_string(),
            parent: Some(parent),
            children: Vec::new(),
            by_name: HashMap::new(),
        });
        let parent = &mut self.entries[parent.0];
        parent.children.push(index);
        parent.by_name.insert(text.to_string(), index);
        index
    }

    pub fn text(&self, index: NavIndex) -> &str {
        &self.entries[index.0].text
    }

    pub fn parent(&self, index: NavIndex) -> Option<NavIndex> {
        self.entries[index.0].parent
    }

    pub fn is_root(&self, index: NavIndex) -> bool {
        self.parent(index).is_none()
    }

    pub fn is_top_level(&self, index: NavIndex) -> bool {
        self.parent(index).is_some_and(|p| self.is_root(p))
    }

    /// A single path such as `/pets/{id}`: a child of a top-level paths collection.
    pub fn is_path(&self, index: NavIndex) -> bool {
        self.parent(index)
            .is_some_and(|p| self.is_top_level(p) && is_paths_collection(self.text(p)))
    }

    pub fn is_responses(&self, index: NavIndex) -> bool {
        self.text(index) == "responses"
    }

    pub fn has_navigable_children(&self, index: NavIndex) -> bool {
        self.is_root(index)
            || self.is_top_level(index)
            || self.is_path(index)
            || self.is_responses(index)
    }

    /// The root's children as navigation nodes.
    pub fn build(&self) -> Vec<NavigationNode> {
        self.nodes(self.root())
    }

    fn nodes(&self, index: NavIndex) -> Vec<NavigationNode> {
        self.entries[index.0]
            .children
            .iter()
            .map(|&child| {
                let entry = &self.entries[child.0];
                let mut node = NavigationNode::new(entry.text.clone(), entry.navigation_id.clone());
                node.children = self.nodes(child);
                node
            })
            .collect()
    }
}

pub(super) fn is_paths_collection(text: &str) -> bool {
    matches!(text, "paths" | "x-ms-paths")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn children_are_unique_by_name_and_keep_insertion_order() {
        let mut tree = NavTree::new();
        let root = tree.root();
        let paths = tree.add(root, "paths", "p");
        tree.add(root, "definitions", "d");
        let again = tree.add(root, "paths", "other");

        let nav = tree.build();

        assert_eq!(again, paths);
        let names: Vec<_> = nav.iter().map(|n| n.display_name.as_str()).collect();
        assert_eq!(names, vec!["paths", "definitions"]);
        assert_eq!(nav[0].navigation_id, "p");
    }

    #[test]
    fn classifies_paths_and_responses() {
        let mut tree = NavTree::new();
        let root = tree.root();
        let paths = tree.add(root, "x-ms-paths", "p");
        let pets = tree.add(paths, "/pets", "p-pets");
        let op = tree.add(pets, "Pets_List", "p-pets-get");
        let responses = tree.add(op, "responses", "p-pets-get-responses");
        let definitions = tree.add(root, "definitions", "d");
        let pet = tree.add(definitions, "Pet", "d-Pet");

        assert!(tree.is_path(pets));
        assert!(!tree.is_path(pet));
        assert!(tree.has_navigable_children(responses));
        assert!(!tree.has_navigable_children(op));
        assert!(tree.has_navigable_children(definitions));
        assert!(!tree.has_navigable_children(pet));
    }
}
