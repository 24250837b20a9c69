//! Reference Graph Builder
//!
//! A single depth-first pass over a [`SyntaxTree`]. Each element is
//! dispatched on its [`Shape`] to one relation rule (see [`rules`]); the node
//! set and edge list live in the builder and are handed out by [`GraphBuilder::build`].
//! Nothing is carried from one run to the next.

pub mod rules;

use crate::element_id::ElementId;
use crate::graph::ReferenceGraph;
use crate::relation::{GraphEdge, Palette, RelationKind};
use crate::scope::BindingResolver;
use crate::syntax::{ElementIdx, IdentifierRole, Shape, SyntaxTree};
use serde::{Deserialize, Serialize};

/// What a graph node's label shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelMode {
    /// The element id, e.g. `identifier-20:21`
    #[default]
    Id,
    /// A short, whitespace-collapsed source excerpt
    Excerpt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub labels: LabelMode,
    /// Maximum excerpt length in characters
    pub excerpt_width: usize,
    pub palette: Palette,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            labels: LabelMode::Id,
            excerpt_width: 24,
            palette: Palette::default(),
        }
    }
}

pub struct GraphBuilder<'a, R: BindingResolver + ?Sized> {
    tree: &'a SyntaxTree,
    resolver: &'a R,
    source: Option<&'a str>,
    options: BuildOptions,
    graph: ReferenceGraph,
}

impl<'a, R: BindingResolver + ?Sized> GraphBuilder<'a, R> {
    pub fn new(tree: &'a SyntaxTree, resolver: &'a R) -> Self {
        Self {
            tree,
            resolver,
            source: None,
            options: BuildOptions::default(),
            graph: ReferenceGraph::new(),
        }
    }

    /// Source text the tree was parsed from; needed for excerpt labels
    pub fn with_source(mut self, source: &'a str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// Walk the whole tree once and return the finished graph
    pub fn build(mut self) -> ReferenceGraph {
        let tree = self.tree;
        for idx in tree.walk() {
            self.visit(idx);
        }

        tracing::debug!(
            "Built reference graph: {} nodes, {} edges from {} elements",
            self.graph.nodes().len(),
            self.graph.edges().len(),
            tree.len()
        );
        self.graph
    }

    fn visit(&mut self, idx: ElementIdx) {
        let tree = self.tree;
        match &tree.get(idx).shape {
            Shape::Identifier {
                name,
                role: IdentifierRole::Read,
            } => self.reference_rule(idx, name),
            Shape::Call { callee, arguments } => self.call_rule(idx, *callee, arguments),
            Shape::Declarator { init, .. } => self.assignment_rule(idx, *init),
            Shape::Return { argument } => self.return_rule(idx, *argument),
            _ => {}
        }
    }

    /// Insert the element as a node (no-op if already present) and return its id
    fn add_node(&mut self, idx: ElementIdx) -> ElementId {
        let id = self.tree.id_of(idx);
        if !self.graph.contains_node(&id) {
            let label = self.label(idx, &id);
            self.graph.add_node(id.clone(), label);
        }
        id
    }

    fn add_edge(
        &mut self,
        source: ElementId,
        target: ElementId,
        relation: RelationKind,
        label: impl Into<String>,
    ) {
        let edge = GraphEdge::new(source, target, relation, label, &self.options.palette);
        self.graph.add_edge(edge);
    }

    fn label(&self, idx: ElementIdx, id: &ElementId) -> String {
        match (self.options.labels, self.source) {
            (LabelMode::Excerpt, Some(source)) => match self.tree.text(idx, source) {
                Some(text) => excerpt(text, self.options.excerpt_width),
                None => id.to_id_string(),
            },
            _ => id.to_id_string(),
        }
    }
}

/// Build a graph with default options
pub fn build_graph<R: BindingResolver + ?Sized>(tree: &SyntaxTree, resolver: &R) -> ReferenceGraph {
    GraphBuilder::new(tree, resolver).build()
}

/// Collapse whitespace and cut to `width` characters
fn excerpt(text: &str, width: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= width {
        return collapsed;
    }
    let mut cut: String = collapsed.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
