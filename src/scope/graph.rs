//! Scope Graph data structure for name binding
//!
//! The scope graph tracks:
//! - Scope hierarchy (parent/child relationships)
//! - Declarations within each scope, pointing at their declaring element
//! - The scope each syntax element was found in

use crate::syntax::ElementIdx;
use std::collections::HashMap;

/// Unique identifier for a scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

impl ScopeId {
    /// Create a root scope ID
    pub fn root() -> Self {
        Self(0)
    }
}

/// The kind of scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// Program level scope
    Module,
    /// Class expression/declaration scope
    Class,
    /// Function scope (parameters and body)
    Function,
    /// Block scope (`{}`, loop headers, catch clauses, switch bodies)
    Block,
}

/// Scope graph for tracking declarations and the scope of every element
#[derive(Debug, Default, Clone)]
pub struct ScopeGraph {
    /// Next scope ID to assign
    next_id: u32,
    /// Scope hierarchy (child → parent)
    parents: HashMap<ScopeId, ScopeId>,
    /// Scope kind
    kinds: HashMap<ScopeId, ScopeKind>,
    /// Declarations: (scope, name) → declaring element
    definitions: HashMap<(ScopeId, String), ElementIdx>,
    /// Scope each element was lowered in
    element_scopes: HashMap<ElementIdx, ScopeId>,
}

impl ScopeGraph {
    /// Create a new scope graph with a root module scope
    pub fn new() -> Self {
        let mut graph = Self::default();
        graph.kinds.insert(ScopeId::root(), ScopeKind::Module);
        graph.next_id = 1;
        graph
    }

    /// Create a new child scope
    pub fn add_scope(&mut self, parent: ScopeId, kind: ScopeKind) -> ScopeId {
        let id = ScopeId(self.next_id);
        self.next_id += 1;
        self.parents.insert(id, parent);
        self.kinds.insert(id, kind);
        id
    }

    /// Add a declaration to a scope.
    ///
    /// A redeclaration keeps the first declaring element (`var x; var x = 1`
    /// binds to the first declarator).
    pub fn add_definition(&mut self, scope: ScopeId, name: impl Into<String>, element: ElementIdx) {
        self.definitions.entry((scope, name.into())).or_insert(element);
    }

    /// Record the scope an element lives in
    pub fn assign(&mut self, element: ElementIdx, scope: ScopeId) {
        self.element_scopes.insert(element, scope);
    }

    pub fn scope_of(&self, element: ElementIdx) -> Option<ScopeId> {
        self.element_scopes.get(&element).copied()
    }

    /// Get the parent of a scope
    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.parents.get(&scope).copied()
    }

    /// Get the kind of a scope
    pub fn kind(&self, scope: ScopeId) -> Option<ScopeKind> {
        self.kinds.get(&scope).copied()
    }

    /// Nearest enclosing scope that `var` declarations hoist to
    pub fn var_scope(&self, scope: ScopeId) -> ScopeId {
        self.scope_chain(scope)
            .into_iter()
            .find(|s| matches!(self.kind(*s), Some(ScopeKind::Function | ScopeKind::Module)))
            .unwrap_or_else(ScopeId::root)
    }

    /// Look up a declaration in a scope (not walking parents)
    pub fn lookup_local(&self, scope: ScopeId, name: &str) -> Option<ElementIdx> {
        self.definitions.get(&(scope, name.to_string())).copied()
    }

    /// Look up a declaration walking up the scope chain
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<ElementIdx> {
        let mut current = Some(scope);
        while let Some(s) = current {
            if let Some(element) = self.lookup_local(s, name) {
                return Some(element);
            }
            current = self.parent(s);
        }
        None
    }

    /// Get scope chain from a scope up to root
    pub fn scope_chain(&self, scope: ScopeId) -> Vec<ScopeId> {
        let mut chain = vec![scope];
        let mut current = scope;
        while let Some(parent) = self.parent(current) {
            chain.push(parent);
            current = parent;
        }
        chain
    }

    pub fn scope_count(&self) -> usize {
        self.kinds.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_hierarchy() {
        let mut graph = ScopeGraph::new();

        let func_scope = graph.add_scope(ScopeId::root(), ScopeKind::Function);
        let block_scope = graph.add_scope(func_scope, ScopeKind::Block);

        assert_eq!(graph.parent(block_scope), Some(func_scope));
        assert_eq!(graph.parent(func_scope), Some(ScopeId::root()));
        assert_eq!(graph.parent(ScopeId::root()), None);
    }

    #[test]
    fn test_definition_lookup() {
        let mut graph = ScopeGraph::new();

        let func_scope = graph.add_scope(ScopeId::root(), ScopeKind::Function);
        let block_scope = graph.add_scope(func_scope, ScopeKind::Block);

        graph.add_definition(ScopeId::root(), "w", ElementIdx(1));
        graph.add_definition(func_scope, "abc", ElementIdx(2));

        assert_eq!(graph.lookup_local(func_scope, "abc"), Some(ElementIdx(2)));
        assert!(graph.lookup_local(func_scope, "w").is_none());

        assert_eq!(graph.lookup(block_scope, "abc"), Some(ElementIdx(2)));
        assert_eq!(graph.lookup(block_scope, "w"), Some(ElementIdx(1)));
        assert!(graph.lookup(ScopeId::root(), "abc").is_none());
    }

    #[test]
    fn test_shadowing_prefers_inner_scope() {
        let mut graph = ScopeGraph::new();
        let func_scope = graph.add_scope(ScopeId::root(), ScopeKind::Function);

        graph.add_definition(ScopeId::root(), "x", ElementIdx(1));
        graph.add_definition(func_scope, "x", ElementIdx(5));

        assert_eq!(graph.lookup(func_scope, "x"), Some(ElementIdx(5)));
        assert_eq!(graph.lookup(ScopeId::root(), "x"), Some(ElementIdx(1)));
    }

    #[test]
    fn test_redeclaration_keeps_first() {
        let mut graph = ScopeGraph::new();
        graph.add_definition(ScopeId::root(), "x", ElementIdx(1));
        graph.add_definition(ScopeId::root(), "x", ElementIdx(9));

        assert_eq!(graph.lookup(ScopeId::root(), "x"), Some(ElementIdx(1)));
    }

    #[test]
    fn test_var_scope_skips_blocks() {
        let mut graph = ScopeGraph::new();
        let func_scope = graph.add_scope(ScopeId::root(), ScopeKind::Function);
        let b1 = graph.add_scope(func_scope, ScopeKind::Block);
        let b2 = graph.add_scope(b1, ScopeKind::Block);
        let top_block = graph.add_scope(ScopeId::root(), ScopeKind::Block);

        assert_eq!(graph.var_scope(b2), func_scope);
        assert_eq!(graph.var_scope(top_block), ScopeId::root());
    }

    #[test]
    fn test_scope_chain() {
        let mut graph = ScopeGraph::new();

        let s1 = graph.add_scope(ScopeId::root(), ScopeKind::Class);
        let s2 = graph.add_scope(s1, ScopeKind::Function);
        let s3 = graph.add_scope(s2, ScopeKind::Block);

        let chain = graph.scope_chain(s3);
        assert_eq!(chain, vec![s3, s2, s1, ScopeId::root()]);
    }
}
