//! Binding resolution - identifier use → declaring element
//!
//! Resolution algorithm:
//! 1. Find the scope the use was lowered in
//! 2. Walk outward through parent scopes
//! 3. First scope declaring the name wins
//! 4. No declaration anywhere → absent (globals, typos); never an error

use super::graph::ScopeGraph;
use crate::syntax::ElementIdx;

/// Scope-aware lookup from an identifier use to its declaring element.
///
/// Implementations must tolerate any name, returning `None` when nothing
/// declares it.
pub trait BindingResolver {
    fn resolve(&self, at: ElementIdx, name: &str) -> Option<ElementIdx>;
}

impl BindingResolver for ScopeGraph {
    fn resolve(&self, at: ElementIdx, name: &str) -> Option<ElementIdx> {
        let scope = self.scope_of(at)?;
        self.lookup(scope, name)
    }
}
