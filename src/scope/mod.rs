//! Scope Graph - lexical name binding
//!
//! The parser front-end records scopes and declarations while lowering; the
//! graph builder only consumes the resulting [`BindingResolver`].

pub mod graph;
pub mod resolver;

pub use graph::{ScopeGraph, ScopeId, ScopeKind};
pub use resolver::BindingResolver;
