use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;

use super::matches_candidate;
use crate::registry::DefinitionRegistry;

/// Definition IDs from dependency packages that were already processed.
///
/// Cloning the index shares it. Builders for different documents may run on
/// different threads against one index; inserting a package is idempotent, so
/// two threads racing to add the same dependency leave one copy.
#[derive(Debug, Clone, Default)]
pub struct DependencyIndex {
    inner: Arc<RwLock<IndexTable>>,
}

#[derive(Debug, Default)]
struct IndexTable {
    packages: HashSet<String>,
    seen: HashSet<String>,
    ids: Vec<String>,
}

impl DependencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a package's IDs. Returns false, changing nothing, when the package
    /// is already indexed.
    pub fn insert_package<I, S>(&self, package: &str, ids: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = self.inner.write();
        if !table.packages.insert(package.to_string()) {
            return false;
        }
        let mut added = 0;
        for id in ids {
            let id = id.into();
            if table.seen.insert(id.clone()) {
                table.ids.push(id);
                added += 1;
            }
        }
        log::debug!("indexed dependency {package} with {added} definition(s)");
        true
    }

    /// Indexes every ID of a finished document's registry.
    pub fn insert_registry(&self, package: &str, registry: &DefinitionRegistry) -> bool {
        self.insert_package(package, registry.iter())
    }

    pub fn contains_package(&self, package: &str) -> bool {
        self.inner.read().packages.contains(package)
    }

    /// IDs matching `candidate`, in insertion order.
    pub fn matches(&self, candidate: &str) -> Vec<String> {
        self.inner
            .read()
            .ids
            .iter()
            .filter(|id| matches_candidate(id, candidate))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
