//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness centrality measures how often an indicator lies on shortest
//! paths between other pairs of indicators. High-betweenness indicators are
//! "bridges": shared infrastructure that ties otherwise separate clusters
//! together, which is typical of C2 servers contacted by several samples.
//!
//! # Algorithm
//!
//! We implement Brandes' algorithm (2001) for unweighted graphs:
//!
//! 1. For each source node `s`, run BFS to compute shortest-path counts
//!    and distances.
//! 2. Accumulate dependency scores in reverse BFS order (farthest nodes first).
//! 3. Sum the dependency scores across all source nodes.
//!
//! Complexity: O(V * E). Nodes in different components never reach each
//! other, so disconnected graphs need no special handling.
//!
//! # Normalization
//!
//! Running BFS from every source visits each unordered pair `{s, t}` twice,
//! once from each end. Multiplying the raw sum by `1 / ((n-1)(n-2))` is
//! therefore the standard undirected factor `2 / ((n-1)(n-2))` applied to
//! per-pair counts. Graphs with fewer than three nodes have no intermediate
//! vertices and score 0.0 everywhere.

use std::collections::{HashMap, VecDeque};

use tracing::instrument;

use crate::graph::build::IndicatorGraph;

/// Compute normalized betweenness centrality for all indicators.
///
/// # Returns
///
/// A `HashMap<String, f64>` mapping each indicator id to its score in
/// `[0, 1]`. Isolated nodes and leaves receive 0.0.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count(), edges = g.edge_count()))]
pub fn betweenness_centrality(g: &IndicatorGraph) -> HashMap<String, f64> {
    let scores = betweenness_scores(&g.adjacency());
    g.indicators()
        .zip(scores)
        .map(|(indicator, score)| (indicator.id.clone(), score))
        .collect()
}

/// Normalized betweenness over a node-indexed adjacency list.
#[must_use]
pub(crate) fn betweenness_scores(adjacency: &[Vec<usize>]) -> Vec<f64> {
    let n = adjacency.len();
    let mut cb = brandes(adjacency);

    if n <= 2 {
        return vec![0.0; n];
    }

    #[allow(clippy::cast_precision_loss)]
    let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
    for score in &mut cb {
        *score *= scale;
    }
    cb
}

/// Raw (unnormalized, ordered-pair) betweenness.
fn brandes(adjacency: &[Vec<usize>]) -> Vec<f64> {
    let n = adjacency.len();

    // Node-indexed betweenness accumulator.
    let mut cb: Vec<f64> = vec![0.0; n];

    // Buffers reused across sources.
    let mut stack: Vec<usize> = Vec::with_capacity(n);
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma: Vec<f64> = vec![0.0; n];
    let mut dist: Vec<i64> = vec![-1; n];
    let mut delta: Vec<f64> = vec![0.0; n];
    let mut queue: VecDeque<usize> = VecDeque::with_capacity(n);

    for s in 0..n {
        stack.clear();
        queue.clear();
        for i in 0..n {
            predecessors[i].clear();
            sigma[i] = 0.0;
            dist[i] = -1;
            delta[i] = 0.0;
        }

        // sigma[t]: number of shortest paths from s to t.
        sigma[s] = 1.0;
        // dist[t]: distance from s to t (-1 = unvisited).
        dist[s] = 0;
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            stack.push(v);

            for &w in &adjacency[v] {
                // First visit to w?
                if dist[w] < 0 {
                    dist[w] = dist[v] + 1;
                    queue.push_back(w);
                }

                // Shortest path to w via v?
                if dist[w] == dist[v] + 1 {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        // Accumulate dependencies in reverse BFS order.
        while let Some(w) = stack.pop() {
            for &v in &predecessors[w] {
                delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
            }
            if w != s {
                cb[w] += delta[w];
            }
        }
    }

    cb
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
