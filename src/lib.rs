//! # Refgraph - reference graphs for JavaScript snippets
//!
//! Exposes how values flow through a small program as a directed graph.
//!
//! Refgraph provides:
//! - Stable element ids derived from node kind and source span
//! - Tree-sitter based parsing lowered into a closed syntax model
//! - Lexical scope resolution from identifier uses to declarations
//! - A single-pass builder emitting reference, call, argument-binding,
//!   assignment and return edges
//! - CLI, file watcher and HTTP surfaces serving the `{ nodes, links }` form

pub mod element_id;
pub mod relation;
pub mod graph;
pub mod syntax;
pub mod scope;
pub mod builder;
pub mod config;
pub mod output;
pub mod ui;
pub mod server;
pub mod watcher;

// Re-exports for convenient access
pub use builder::{build_graph, BuildOptions, GraphBuilder, LabelMode};
pub use config::RefgraphConfig;
pub use element_id::{identify, span_of, ElementId, Span};
pub use graph::{GraphData, GraphNode, ReferenceGraph};
pub use relation::{GraphEdge, Palette, RelationKind};
pub use syntax::{JavaScriptParser, ParsedSource};

/// Result type alias for Refgraph operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Refgraph operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Language error: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("Invalid element id: {0}")]
    InvalidId(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Parser plus build options; every call to [`Analyzer::analyze`] is a
/// fresh run that shares nothing with earlier ones.
pub struct Analyzer {
    parser: JavaScriptParser,
    options: BuildOptions,
}

impl Analyzer {
    pub fn new(options: BuildOptions) -> Result<Self> {
        Ok(Self {
            parser: JavaScriptParser::new()?,
            options,
        })
    }

    pub fn from_config(config: &RefgraphConfig) -> Result<Self> {
        Ok(Self {
            parser: JavaScriptParser::new()?.with_strict(config.analysis.strict),
            options: config.build_options(),
        })
    }

    /// Parse `source` and build its reference graph.
    ///
    /// Fails only when the source cannot be parsed; nothing is produced then.
    pub fn analyze(&mut self, source: &str) -> Result<ReferenceGraph> {
        let parsed = self.parser.parse(source)?;
        let graph = GraphBuilder::new(&parsed.tree, &parsed.scopes)
            .with_source(&parsed.source)
            .with_options(self.options.clone())
            .build();
        Ok(graph)
    }
}

/// Analyze `source` with default settings and return the wire form
pub fn analyze(source: &str) -> Result<GraphData> {
    let graph = Analyzer::new(BuildOptions::default())?.analyze(source)?;
    Ok(graph.to_data())
}
