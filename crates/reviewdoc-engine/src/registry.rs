//! Definition IDs: the stable, document-scoped names reviewers comment on and
//! tokens link to.

use std::collections::HashSet;

/// Outcome of registering an ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Inserted,
    /// The ID was already taken by another declaration.
    Duplicate,
    /// An extension ID seen before; its members merge into the earlier one.
    Merged,
}

/// Every definition ID in one document, in registration order.
#[derive(Debug, Default, Clone)]
pub struct DefinitionRegistry {
    order: Vec<String>,
    ids: HashSet<String>,
    declared: HashSet<String>,
    extensions: HashSet<String>,
}

impl DefinitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: &str) -> Registration {
        if self.insert(id) {
            Registration::Inserted
        } else {
            Registration::Duplicate
        }
    }

    /// Registers an extension ID. Repeats are expected and are not duplicates,
    /// but an extension may not reuse the ID of a non-extension declaration.
    pub fn register_extension(&mut self, id: &str) -> Registration {
        if self.extensions.contains(id) {
            return Registration::Merged;
        }
        let outcome = self.register(id);
        self.extensions.insert(id.to_string());
        outcome
    }

    /// Records `id` as carried by an emitted declaration token (a type name,
    /// member or text). Each ID may be declared once; an ID already produced by
    /// [`build_id`](Self::build_id) is not a conflict.
    pub fn declare(&mut self, id: &str) -> Registration {
        if !self.declared.insert(id.to_string()) {
            return Registration::Duplicate;
        }
        self.insert(id);
        Registration::Inserted
    }

    /// Joins `prefix` and `name` with a dot, strips whitespace and registers the result.
    pub fn build_id(&mut self, name: &str, prefix: Option<&str>) -> (String, Registration) {
        let id = match prefix {
            Some(prefix) if !prefix.is_empty() => normalize_id(&format!("{prefix}.{name}")),
            _ => normalize_id(name),
        };
        let outcome = self.register(&id);
        (id, outcome)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// IDs in the order they were first registered.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn insert(&mut self, id: &str) -> bool {
        if self.ids.contains(id) {
            return false;
        }
        self.ids.insert(id.to_string());
        self.order.push(id.to_string());
        true
    }
}

/// Removes every whitespace character. IDs end up in URLs and anchors.
pub fn normalize_id(id: &str) -> String {
    id.chars().filter(|c| !c.is_whitespace()).collect()
}
