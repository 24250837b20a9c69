use crate::graph::{GraphStats, ReferenceGraph};
use crate::ui::theme::Theme;
use owo_colors::OwoColorize;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct EdgeRow {
    #[tabled(rename = "Relation")]
    pub relation: String,
    #[tabled(rename = "Source")]
    pub source: String,
    #[tabled(rename = "Target")]
    pub target: String,
    #[tabled(rename = "Label")]
    pub label: String,
}

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

/// One row per edge, in emission order
pub fn edge_table(graph: &ReferenceGraph, theme: &Theme) -> String {
    if graph.edges().is_empty() {
        return String::new();
    }

    let rows: Vec<EdgeRow> = graph
        .edges()
        .iter()
        .map(|edge| EdgeRow {
            relation: edge
                .relation
                .as_str()
                .style(theme.relation(edge.relation))
                .to_string(),
            source: edge.source.to_string(),
            target: edge.target.to_string(),
            label: edge.label.clone(),
        })
        .collect();

    Table::new(&rows).with(Style::rounded()).to_string()
}

pub fn stats_table(stats: &GraphStats) -> String {
    let mut rows = vec![
        TableRow {
            metric: "Nodes".to_string(),
            value: stats.total_nodes.to_string(),
        },
        TableRow {
            metric: "Edges".to_string(),
            value: stats.total_edges.to_string(),
        },
    ];
    for (kind, count) in &stats.by_relation {
        rows.push(TableRow {
            metric: kind.as_str().to_string(),
            value: count.to_string(),
        });
    }

    Table::new(&rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Analyzer, BuildOptions};

    fn sample() -> ReferenceGraph {
        Analyzer::new(BuildOptions::default())
            .unwrap()
            .analyze("var x = 1\nvar y = x\n")
            .unwrap()
    }

    #[test]
    fn test_edge_table_lists_every_edge() {
        let graph = sample();
        let table = edge_table(&graph, &Theme::plain());

        assert!(table.contains("Relation"));
        assert!(table.contains("value-assignment"));
        assert!(table.contains("reference"));
        assert!(table.contains("ref: \"x\""));
        for edge in graph.edges() {
            assert!(table.contains(&edge.source.to_string()));
        }
    }

    #[test]
    fn test_edge_table_empty_graph() {
        let graph = ReferenceGraph::new();
        assert!(edge_table(&graph, &Theme::plain()).is_empty());
    }

    #[test]
    fn test_stats_table() {
        let table = stats_table(&sample().stats());
        assert!(table.contains("Nodes"));
        assert!(table.contains("Edges"));
        assert!(table.contains("value-assignment"));
    }
}
