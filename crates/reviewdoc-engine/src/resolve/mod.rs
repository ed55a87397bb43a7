//! # Cross-Reference Resolution
//!
//! Best-effort linking of type references to registered definition IDs. This
//! is name matching, not type checking.
//!
//! ## Matching
//!
//! - A bare name used inside a declaration is first qualified by the nearest
//!   enclosing non-callable declaration that has an ID (`Pkg.Foo` + `Bar` gives
//!   `Pkg.Foo.Bar`). If that finds nothing, the bare name is tried on its own.
//! - A dotted candidate matches every ID ending in it on a segment boundary.
//! - An undotted candidate matches only IDs whose last segment equals it.
//! - The document's own registry is searched before the dependency index.
//!
//! ## Key Invariants
//!
//! - Several matches pick the first registered one and report ambiguity
//! - No match yields [`UNRESOLVED`], never an empty target

pub mod index;

pub use index::DependencyIndex;

use crate::declarations::DeclRef;
use crate::registry::DefinitionRegistry;

/// Link target for references that match nothing.
pub const UNRESOLVED: &str = "__UNRESOLVED__";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(String),
    /// Several IDs matched; `chosen` is the first registered of `candidates`.
    Ambiguous {
        chosen: String,
        candidates: Vec<String>,
    },
    Unresolved,
}

impl Resolution {
    /// The ID a token should navigate to.
    pub fn target(&self) -> &str {
        match self {
            Resolution::Resolved(id) => id,
            Resolution::Ambiguous { chosen, .. } => chosen,
            Resolution::Unresolved => UNRESOLVED,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, Resolution::Unresolved)
    }

    fn from_matches(mut matches: Vec<String>) -> Self {
        match matches.len() {
            0 => Resolution::Unresolved,
            1 => Resolution::Resolved(matches.remove(0)),
            _ => Resolution::Ambiguous {
                chosen: matches[0].clone(),
                candidates: matches,
            },
        }
    }
}

pub struct Resolver<'r> {
    registry: &'r DefinitionRegistry,
    dependencies: Option<&'r DependencyIndex>,
}

impl<'r> Resolver<'r> {
    pub fn new(registry: &'r DefinitionRegistry) -> Self {
        Self {
            registry,
            dependencies: None,
        }
    }

    pub fn with_dependencies(mut self, dependencies: &'r DependencyIndex) -> Self {
        self.dependencies = Some(dependencies);
        self
    }

    pub fn resolve(&self, name: &str, parent: Option<DeclRef<'_>>) -> Resolution {
        let name = name.trim();
        if name.is_empty() {
            return Resolution::Unresolved;
        }

        if !name.contains('.')
            && let Some(parent_id) = parent.and_then(|parent| parent.qualifying_id())
        {
            let qualified = self.resolve_candidate(&format!("{parent_id}.{name}"));
            if qualified.is_resolved() {
                return qualified;
            }
        }

        self.resolve_candidate(name)
    }

    fn resolve_candidate(&self, candidate: &str) -> Resolution {
        let local: Vec<String> = self
            .registry
            .iter()
            .filter(|id| matches_candidate(id, candidate))
            .map(str::to_string)
            .collect();
        if !local.is_empty() {
            return Resolution::from_matches(local);
        }

        match self.dependencies {
            Some(index) => Resolution::from_matches(index.matches(candidate)),
            None => Resolution::Unresolved,
        }
    }
}

/// Whether registered `id` matches a reference `candidate`.
pub fn matches_candidate(id: &str, candidate: &str) -> bool {
    if candidate.contains('.') {
        id == candidate
            || id
                .strip_suffix(candidate)
                .is_some_and(|head| head.ends_with('.'))
    } else {
        id.rsplit('.').next() == Some(candidate)
    }
}
