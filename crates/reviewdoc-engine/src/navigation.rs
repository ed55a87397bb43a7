//! Builds the navigation sidebar from the declarations a front end recorded.
//!
//! Source order is deliberately dropped here; every sibling list comes out
//! sorted by display name. The line tree keeps source order for rendering.

use std::collections::{HashMap, HashSet};

use crate::declarations::{DeclRef, DeclarationTree};
use crate::model::{NavigationNode, sort_nodes};

pub fn build_navigation(tree: &DeclarationTree) -> Vec<NavigationNode> {
    let mut nodes: Vec<NavigationNode> = tree
        .roots()
        .filter(|decl| decl.is_visible())
        .map(|decl| {
            let id = navigation_id(decl);
            let mut node = NavigationNode::new(decl.name(), id.clone());
            node.children = member_nodes(&id, decl.members());
            node
        })
        .collect();

    nodes.extend(merge_extensions(tree).into_iter().map(|extension| {
        let mut node = NavigationNode::new(extension.name, extension.id.clone());
        node.children = member_nodes(&extension.id, extension.members.into_iter());
        node
    }));

    sort_nodes(&mut nodes);
    nodes
}

/// Wraps the navigation of a whole package under a single node named after
/// the package, for front ends that do not declare the package themselves.
pub fn build_package_navigation(package: &str, tree: &DeclarationTree) -> NavigationNode {
    let mut root = NavigationNode::new(package, package);
    root.children = build_navigation(tree);
    root
}

struct MergedExtension<'a> {
    id: String,
    name: &'a str,
    members: Vec<DeclRef<'a>>,
}

/// Folds extensions that share a definition ID into one, keeping the first
/// member seen for each member ID.
fn merge_extensions(tree: &DeclarationTree) -> Vec<MergedExtension<'_>> {
    let mut merged: Vec<MergedExtension<'_>> = Vec::new();
    let mut by_id: HashMap<String, usize> = HashMap::new();
    let mut seen_members: Vec<HashSet<String>> = Vec::new();

    for extension in tree.extensions().filter(|decl| decl.is_visible()) {
        let id = navigation_id(extension);
        let index = *by_id.entry(id.clone()).or_insert_with(|| {
            merged.push(MergedExtension {
                id,
                name: extension.name(),
                members: Vec::new(),
            });
            seen_members.push(HashSet::new());
            merged.len() - 1
        });

        for member in extension.members() {
            let key = member
                .definition_id()
                .unwrap_or_else(|| member.name())
                .to_string();
            if seen_members[index].insert(key) {
                merged[index].members.push(member);
            }
        }
    }

    merged.sort_by(|a, b| a.id.cmp(&b.id));
    merged
}

fn member_nodes<'a>(
    parent_id: &str,
    members: impl Iterator<Item = DeclRef<'a>>,
) -> Vec<NavigationNode> {
    members
        .filter(|member| member.is_visible())
        .map(|member| {
            let id = format!("{parent_id}.{}", member.name());
            let mut node = NavigationNode::new(member.name(), id.clone());
            node.children = member_nodes(&id, member.members());
            node
        })
        .collect()
}

fn navigation_id(decl: DeclRef<'_>) -> String {
    match decl.definition_id() {
        Some(id) => id.to_string(),
        None => {
            log::warn!(
                "declaration `{}` has no definition id, navigating by name",
                decl.name()
            );
            decl.name().to_string()
        }
    }
}
