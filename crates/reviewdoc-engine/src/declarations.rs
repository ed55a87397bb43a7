//! Declaration arena.
//!
//! Front ends record the declarations they visit here so the resolver can
//! qualify bare names by their enclosing type and the navigation builder can
//! list members. Nodes live in one `Vec`; parents are plain indices, so a
//! member can look up its parent but never owns it.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Package,
    Namespace,
    Class,
    Struct,
    Enum,
    Protocol,
    Extension,
    TypeAlias,
    Function,
    Method,
    Initializer,
    Subscript,
    Property,
    EnumCase,
    Other,
}

impl DeclarationKind {
    /// Callables are skipped when qualifying names: a parameter type resolves
    /// relative to the enclosing type, not the method.
    pub fn is_callable(self) -> bool {
        matches!(
            self,
            DeclarationKind::Function
                | DeclarationKind::Method
                | DeclarationKind::Initializer
                | DeclarationKind::Subscript
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclarationId(usize);

#[derive(Debug, Clone)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub name: String,
    pub definition_id: Option<String>,
    pub is_visible: bool,
    parent: Option<DeclarationId>,
    members: Vec<DeclarationId>,
}

impl Declaration {
    pub fn new(kind: DeclarationKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            definition_id: None,
            is_visible: true,
            parent: None,
            members: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.definition_id = Some(id.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.is_visible = false;
        self
    }
}

#[derive(Debug, Default, Clone)]
pub struct DeclarationTree {
    nodes: Vec<Declaration>,
    roots: Vec<DeclarationId>,
    extensions: Vec<DeclarationId>,
}

impl DeclarationTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a top-level declaration.
    pub fn add_root(&mut self, declaration: Declaration) -> DeclarationId {
        let id = self.push(declaration, None);
        self.roots.push(id);
        id
    }

    /// Adds an extension that augments an existing type. Extensions are kept
    /// apart from the top-level declarations and merged by definition ID when
    /// navigation is built.
    pub fn add_extension(&mut self, declaration: Declaration) -> DeclarationId {
        let id = self.push(declaration, None);
        self.extensions.push(id);
        id
    }

    pub fn add_member(&mut self, parent: DeclarationId, declaration: Declaration) -> DeclarationId {
        let id = self.push(declaration, Some(parent));
        self.nodes[parent.0].members.push(id);
        id
    }

    pub fn get(&self, id: DeclarationId) -> DeclRef<'_> {
        DeclRef { tree: self, id }
    }

    pub fn roots(&self) -> impl Iterator<Item = DeclRef<'_>> {
        self.roots.iter().map(|&id| self.get(id))
    }

    pub fn extensions(&self) -> impl Iterator<Item = DeclRef<'_>> {
        self.extensions.iter().map(|&id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(
        &mut self,
        mut declaration: Declaration,
        parent: Option<DeclarationId>,
    ) -> DeclarationId {
        let id = DeclarationId(self.nodes.len());
        declaration.parent = parent;
        declaration.members.clear();
        self.nodes.push(declaration);
        id
    }
}

/// A borrowed view of one declaration that can walk to its parent and members.
#[derive(Debug, Clone, Copy)]
pub struct DeclRef<'a> {
    tree: &'a DeclarationTree,
    id: DeclarationId,
}

impl<'a> DeclRef<'a> {
    pub fn id(&self) -> DeclarationId {
        self.id
    }

    pub fn declaration(&self) -> &'a Declaration {
        &self.tree.nodes[self.id.0]
    }

    pub fn kind(&self) -> DeclarationKind {
        self.declaration().kind
    }

    pub fn name(&self) -> &'a str {
        &self.declaration().name
    }

    pub fn definition_id(&self) -> Option<&'a str> {
        self.declaration().definition_id.as_deref()
    }

    pub fn is_visible(&self) -> bool {
        self.declaration().is_visible
    }

    pub fn parent(&self) -> Option<DeclRef<'a>> {
        self.declaration().parent.map(|id| self.tree.get(id))
    }

    pub fn members(self) -> impl Iterator<Item = DeclRef<'a>> + 'a {
        let tree = self.tree;
        self.declaration().members.iter().map(move |&id| tree.get(id))
    }

    /// Nearest enclosing non-callable declaration with a definition ID,
    /// starting at this declaration.
    pub fn qualifying_id(&self) -> Option<&'a str> {
        let mut current = Some(*self);
        while let Some(decl) = current {
            if !decl.kind().is_callable()
                && let Some(id) = decl.definition_id()
            {
                return Some(id);
            }
            current = decl.parent();
        }
        None
    }
}
