//! Local graph metrics: degree centrality and clustering coefficient.
//!
//! Both are cheap (linear in edges, plus a neighbor-pair scan for
//! clustering) and purely structural. Results follow node-index order
//! internally and are keyed by indicator id at the public surface.

use std::collections::HashMap;

use crate::graph::build::IndicatorGraph;

// ---------------------------------------------------------------------------
// Degree Centrality
// ---------------------------------------------------------------------------

/// Compute normalized degree centrality: `degree / (n - 1)`.
///
/// Returns 0.0 for every node when the graph has one node or fewer.
#[must_use]
pub fn degree_centrality(g: &IndicatorGraph) -> HashMap<String, f64> {
    keyed(g, degree_scores(&g.adjacency()))
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub(crate) fn degree_scores(adjacency: &[Vec<usize>]) -> Vec<f64> {
    let n = adjacency.len();
    if n <= 1 {
        return vec![0.0; n];
    }
    let denom = (n - 1) as f64;
    adjacency
        .iter()
        .map(|neighbors| neighbors.len() as f64 / denom)
        .collect()
}

// ---------------------------------------------------------------------------
// Clustering Coefficient
// ---------------------------------------------------------------------------

/// Compute the local clustering coefficient of every node.
///
/// For a node with degree `k >= 2`, this is the number of edges among its
/// neighbors divided by `k * (k - 1) / 2`. Nodes with degree below 2 score
/// 0.0.
#[must_use]
pub fn clustering_coefficients(g: &IndicatorGraph) -> HashMap<String, f64> {
    keyed(g, clustering_scores(&g.adjacency()))
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub(crate) fn clustering_scores(adjacency: &[Vec<usize>]) -> Vec<f64> {
    adjacency
        .iter()
        .map(|neighbors| {
            let k = neighbors.len();
            if k < 2 {
                return 0.0;
            }

            let mut links = 0usize;
            for (i, &u) in neighbors.iter().enumerate() {
                for &v in &neighbors[i + 1..] {
                    // Neighbor lists are sorted, so membership is a binary search.
                    if adjacency[u].binary_search(&v).is_ok() {
                        links += 1;
                    }
                }
            }

            let possible = k * (k - 1) / 2;
            links as f64 / possible as f64
        })
        .collect()
}

fn keyed(g: &IndicatorGraph, scores: Vec<f64>) -> HashMap<String, f64> {
    g.indicators()
        .zip(scores)
        .map(|(indicator, score)| (indicator.id.clone(), score))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphunt_core::model::{EdgeRecord, NodeRecord};

    fn make_graph(nodes: &[&str], edges: &[(&str, &str)]) -> IndicatorGraph {
        let nodes: Vec<NodeRecord> = nodes.iter().map(|id| NodeRecord::untyped(*id)).collect();
        let edges: Vec<EdgeRecord> = edges.iter().map(|(a, b)| EdgeRecord::new(*a, *b)).collect();
        IndicatorGraph::build(&nodes, &edges)
    }

    #[test]
    fn degree_of_single_node_is_zero() {
        let g = make_graph(&["only"], &[]);
        assert_eq!(degree_centrality(&g)["only"], 0.0);
    }

    #[test]
    fn degree_of_star() {
        let g = make_graph(&[], &[("hub", "a"), ("hub", "b"), ("hub", "c")]);
        let dc = degree_centrality(&g);
        assert!((dc["hub"] - 1.0).abs() < 1e-12);
        assert!((dc["a"] - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn degree_counts_isolated_nodes_in_denominator() {
        let g = make_graph(&["x", "y"], &[("a", "b")]);
        let dc = degree_centrality(&g);
        assert!((dc["a"] - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(dc["x"], 0.0);
    }

    #[test]
    fn clustering_of_triangle_is_one() {
        let g = make_graph(&[], &[("a", "b"), ("b", "c"), ("c", "a")]);
        let cc = clustering_coefficients(&g);
        for id in ["a", "b", "c"] {
            assert!((cc[id] - 1.0).abs() < 1e-12, "{id}: {}", cc[id]);
        }
    }

    #[test]
    fn clustering_of_star_hub_is_zero() {
        let g = make_graph(&[], &[("hub", "a"), ("hub", "b"), ("hub", "c")]);
        let cc = clustering_coefficients(&g);
        assert_eq!(cc["hub"], 0.0);
        assert_eq!(cc["a"], 0.0);
    }

    #[test]
    fn clustering_counts_partial_neighbor_links() {
        // hub has neighbors a, b, c; only a-b is linked → 1 of 3 pairs.
        let g = make_graph(&[], &[("hub", "a"), ("hub", "b"), ("hub", "c"), ("a", "b")]);
        let cc = clustering_coefficients(&g);
        assert!((cc["hub"] - 1.0 / 3.0).abs() < 1e-12, "got {}", cc["hub"]);
        // a has neighbors hub, b, which are linked.
        assert!((cc["a"] - 1.0).abs() < 1e-12);
        assert_eq!(cc["c"], 0.0);
    }
}
