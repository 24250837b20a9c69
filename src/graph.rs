//! Reference Graph - the output snapshot of one analysis run
//!
//! Holds a node set keyed by [`ElementId`] (re-insertion is a no-op) and an
//! append-only edge list. [`GraphData`] is the serialized form handed to
//! graph consumers.

use crate::element_id::ElementId;
use crate::relation::{GraphEdge, RelationKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A node in the reference graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: ElementId,
    pub label: String,
}

/// In-memory reference graph for a single run.
#[derive(Debug, Default, Clone)]
pub struct ReferenceGraph {
    /// Nodes in first-insertion order
    nodes: Vec<GraphNode>,
    /// Position of each node in `nodes`
    index: HashMap<ElementId, usize>,
    edges: Vec<GraphEdge>,
}

impl ReferenceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Returns false if a node with the same id already exists.
    pub fn add_node(&mut self, id: ElementId, label: impl Into<String>) -> bool {
        if self.index.contains_key(&id) {
            return false;
        }
        self.index.insert(id.clone(), self.nodes.len());
        self.nodes.push(GraphNode {
            id,
            label: label.into(),
        });
        true
    }

    pub fn add_edge(&mut self, edge: GraphEdge) {
        self.edges.push(edge);
    }

    pub fn get_node(&self, id: &ElementId) -> Option<&GraphNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn contains_node(&self, id: &ElementId) -> bool {
        self.index.contains_key(id)
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn edges_from(&self, id: &ElementId) -> Vec<&GraphEdge> {
        self.edges.iter().filter(|e| &e.source == id).collect()
    }

    pub fn edges_to(&self, id: &ElementId) -> Vec<&GraphEdge> {
        self.edges.iter().filter(|e| &e.target == id).collect()
    }

    pub fn edges_by_relation(&self, relation: RelationKind) -> Vec<&GraphEdge> {
        self.edges.iter().filter(|e| e.relation == relation).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn stats(&self) -> GraphStats {
        let by_relation = RelationKind::all()
            .iter()
            .map(|kind| (*kind, self.edges.iter().filter(|e| e.relation == *kind).count()))
            .collect();

        GraphStats {
            total_nodes: self.nodes.len(),
            total_edges: self.edges.len(),
            by_relation,
        }
    }

    /// Convert into the consumer-facing `{ nodes, links }` form
    pub fn to_data(&self) -> GraphData {
        GraphData {
            nodes: self
                .nodes
                .iter()
                .map(|n| NodeData {
                    id: n.id.to_id_string(),
                    label: n.label.clone(),
                })
                .collect(),
            links: self
                .edges
                .iter()
                .map(|e| LinkData {
                    source: e.source.to_id_string(),
                    target: e.target.to_id_string(),
                    name: e.label.clone(),
                    color: e.color.clone(),
                })
                .collect(),
        }
    }
}

/// Statistics about a reference graph
#[derive(Debug, Clone, Serialize)]
pub struct GraphStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub by_relation: Vec<(RelationKind, usize)>,
}

impl std::fmt::Display for GraphStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Reference Graph Statistics:")?;
        writeln!(f, "  Nodes: {}", self.total_nodes)?;
        writeln!(f, "  Edges: {}", self.total_edges)?;
        for (kind, count) in &self.by_relation {
            writeln!(f, "    {}: {}", kind, count)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeData {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkData {
    pub source: String,
    pub target: String,
    pub name: String,
    pub color: String,
}

/// Wire form of a reference graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<NodeData>,
    pub links: Vec<LinkData>,
}

impl GraphData {
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element_id::Span;
    use crate::relation::Palette;

    fn id(kind: &str, start: usize, end: usize) -> ElementId {
        ElementId::new(kind, Span::new(start, end))
    }

    #[test]
    fn test_node_reinsertion_is_noop() {
        let mut graph = ReferenceGraph::new();
        assert!(graph.add_node(id("identifier", 0, 1), "first"));
        assert!(!graph.add_node(id("identifier", 0, 1), "second"));

        assert_eq!(graph.nodes().len(), 1);
        assert_eq!(graph.get_node(&id("identifier", 0, 1)).unwrap().label, "first");
    }

    #[test]
    fn test_edges_are_not_deduplicated() {
        let palette = Palette::default();
        let mut graph = ReferenceGraph::new();
        let a = id("identifier", 0, 1);
        let b = id("variable_declarator", 4, 9);
        graph.add_edge(GraphEdge::new(a.clone(), b.clone(), RelationKind::Reference, "ref", &palette));
        graph.add_edge(GraphEdge::new(a.clone(), b.clone(), RelationKind::Reference, "ref", &palette));

        assert_eq!(graph.edges_from(&a).len(), 2);
        assert_eq!(graph.edges_to(&b).len(), 2);
    }

    #[test]
    fn test_to_data_matches_wire_contract() {
        let palette = Palette::default();
        let mut graph = ReferenceGraph::new();
        let decl = id("variable_declarator", 4, 11);
        let init = id("number", 8, 11);
        graph.add_node(decl.clone(), decl.to_id_string());
        graph.add_node(init.clone(), init.to_id_string());
        graph.add_edge(GraphEdge::new(decl, init, RelationKind::ValueAssignment, "value assignment", &palette));

        let json = serde_json::to_value(graph.to_data()).unwrap();
        assert_eq!(json["nodes"][0]["id"], "variable_declarator-4:11");
        assert_eq!(json["nodes"][1]["label"], "number-8:11");
        assert_eq!(json["links"][0]["source"], "variable_declarator-4:11");
        assert_eq!(json["links"][0]["target"], "number-8:11");
        assert_eq!(json["links"][0]["name"], "value assignment");
        assert_eq!(json["links"][0]["color"], "green");
    }

    #[test]
    fn test_stats_by_relation() {
        let palette = Palette::default();
        let mut graph = ReferenceGraph::new();
        graph.add_edge(GraphEdge::new(id("a", 0, 1), id("b", 1, 2), RelationKind::Reference, "", &palette));
        graph.add_edge(GraphEdge::new(id("a", 0, 1), id("c", 2, 3), RelationKind::Reference, "", &palette));
        graph.add_edge(GraphEdge::new(id("c", 2, 3), id("b", 1, 2), RelationKind::ReturnArgument, "", &palette));

        let stats = graph.stats();
        assert_eq!(stats.total_edges, 3);
        let refs = stats.by_relation.iter().find(|(k, _)| *k == RelationKind::Reference).unwrap();
        assert_eq!(refs.1, 2);
    }
}
