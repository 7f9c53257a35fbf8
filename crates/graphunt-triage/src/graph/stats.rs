//! Basic graph statistics for the relationship graph.
//!
//! # Statistics Provided
//!
//! - **node_count** / **edge_count**: size of the simple graph after
//!   deduplication.
//! - **density**: `2E / (n * (n - 1))` for an undirected graph. A complete
//!   graph has density 1.0; an empty or single-node graph has density 0.0.
//! - **component_count**: number of connected components. Values above 1
//!   mean the batch contains unrelated clusters of infrastructure.
//! - **isolated_node_count**: indicators with no relationships at all.
//! - **max_degree**: most relationships on a single indicator.
//! - **category_counts**: indicators per category label.

use std::collections::BTreeMap;

use petgraph::algo::connected_components;
use serde::Serialize;

use crate::graph::build::IndicatorGraph;

/// Summary statistics for an indicator graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    /// Zero for graphs with 0 or 1 node.
    pub density: f64,
    pub component_count: usize,
    pub isolated_node_count: usize,
    pub max_degree: usize,
    /// Indicator count per category label, sorted by label.
    pub category_counts: BTreeMap<String, usize>,
}

impl GraphStats {
    /// Compute statistics from an [`IndicatorGraph`].
    #[must_use]
    pub fn from_graph(g: &IndicatorGraph) -> Self {
        let node_count = g.node_count();
        let edge_count = g.edge_count();

        let density = undirected_density(node_count, edge_count);

        let component_count = if node_count == 0 {
            0
        } else {
            connected_components(&g.graph)
        };

        let mut isolated_node_count = 0;
        let mut max_degree = 0;
        for idx in g.graph.node_indices() {
            let degree = g.graph.neighbors(idx).count();
            if degree == 0 {
                isolated_node_count += 1;
            }
            max_degree = max_degree.max(degree);
        }

        let mut category_counts = BTreeMap::new();
        for indicator in g.indicators() {
            *category_counts
                .entry(indicator.category.as_str().to_string())
                .or_insert(0) += 1;
        }

        Self {
            node_count,
            edge_count,
            density,
            component_count,
            isolated_node_count,
            max_degree,
            category_counts,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn undirected_density(n: usize, e: usize) -> f64 {
    if n < 2 {
        return 0.0;
    }
    (2 * e) as f64 / (n * (n - 1)) as f64
}
