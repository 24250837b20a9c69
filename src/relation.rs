//! Relation types - the semantic links between syntax elements
//!
//! Every edge in a reference graph is one of five relations:
//! - `Reference`: identifier use → declaring element
//! - `CallCallee`: call → callee (resolved declaration or callee expression)
//! - `CallArgumentBinding`: parameter → argument at the same position
//! - `ValueAssignment`: declarator → initializer
//! - `ReturnArgument`: enclosing function → returned expression

use crate::element_id::ElementId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The fixed set of relation kinds. Direction is part of each relation's meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationKind {
    Reference,
    CallCallee,
    CallArgumentBinding,
    ValueAssignment,
    ReturnArgument,
}

impl RelationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::Reference => "reference",
            RelationKind::CallCallee => "call-callee",
            RelationKind::CallArgumentBinding => "call-argument-binding",
            RelationKind::ValueAssignment => "value-assignment",
            RelationKind::ReturnArgument => "return-argument",
        }
    }

    pub fn all() -> &'static [RelationKind] {
        &[
            RelationKind::Reference,
            RelationKind::CallCallee,
            RelationKind::CallArgumentBinding,
            RelationKind::ValueAssignment,
            RelationKind::ReturnArgument,
        ]
    }

    /// Default style hint for consumers
    pub fn default_color(&self) -> &'static str {
        match self {
            RelationKind::Reference => "red",
            RelationKind::CallCallee => "purple",
            RelationKind::CallArgumentBinding => "orange",
            RelationKind::ValueAssignment => "green",
            RelationKind::ReturnArgument => "pink",
        }
    }
}

impl FromStr for RelationKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "reference" | "ref" => Ok(RelationKind::Reference),
            "call-callee" | "callee" | "call" => Ok(RelationKind::CallCallee),
            "call-argument-binding" | "call-args" | "argument" | "arg" => {
                Ok(RelationKind::CallArgumentBinding)
            }
            "value-assignment" | "assignment" | "assign" => Ok(RelationKind::ValueAssignment),
            "return-argument" | "return" => Ok(RelationKind::ReturnArgument),
            _ => Err(crate::Error::Config(format!("Unknown relation kind: {}", s))),
        }
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-relation colour palette. Each relation keeps one stable hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub reference: String,
    pub call_callee: String,
    pub call_argument_binding: String,
    pub value_assignment: String,
    pub return_argument: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            reference: RelationKind::Reference.default_color().to_string(),
            call_callee: RelationKind::CallCallee.default_color().to_string(),
            call_argument_binding: RelationKind::CallArgumentBinding.default_color().to_string(),
            value_assignment: RelationKind::ValueAssignment.default_color().to_string(),
            return_argument: RelationKind::ReturnArgument.default_color().to_string(),
        }
    }
}

impl Palette {
    pub fn color_for(&self, relation: RelationKind) -> &str {
        match relation {
            RelationKind::Reference => &self.reference,
            RelationKind::CallCallee => &self.call_callee,
            RelationKind::CallArgumentBinding => &self.call_argument_binding,
            RelationKind::ValueAssignment => &self.value_assignment,
            RelationKind::ReturnArgument => &self.return_argument,
        }
    }
}

/// A directed edge between two syntax elements.
///
/// Edges are never deduplicated: the same pair may be linked by several
/// relations, and each rule firing appends its own edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: ElementId,
    pub target: ElementId,
    pub relation: RelationKind,
    /// Human readable label
    pub label: String,
    /// Style hint taken from the palette
    pub color: String,
}

impl GraphEdge {
    pub fn new(
        source: ElementId,
        target: ElementId,
        relation: RelationKind,
        label: impl Into<String>,
        palette: &Palette,
    ) -> Self {
        Self {
            source,
            target,
            relation,
            label: label.into(),
            color: palette.color_for(relation).to_string(),
        }
    }
}
