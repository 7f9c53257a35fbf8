//! Centrality metrics for the relationship graph.
//!
//! # Overview
//!
//! Each metric answers a different question about an indicator:
//!
//! - **Degree centrality** (`basic`): how many other indicators does it
//!   touch directly?
//! - **Betweenness centrality** (`betweenness`): does it bridge otherwise
//!   separate parts of the infrastructure?
//! - **Clustering coefficient** (`basic`): are its neighbors tightly
//!   interlinked among themselves?
//!
//! # Usage
//!
//! [`centrality`] computes all three in one pass over a shared adjacency
//! list and returns them as a [`CentralityMap`] keyed by indicator id. The
//! graph itself is never modified, so the layout engine can read it at the
//! same time.
//!
//! ```rust,ignore
//! use graphunt_triage::metrics::centrality;
//!
//! let metrics = centrality(&graph);
//! let hub = metrics.get("8.8.8.8").expect("known id");
//! println!("degree={} betweenness={}", hub.degree, hub.betweenness);
//! ```

pub mod basic;
pub mod betweenness;

use std::collections::HashMap;

use serde::Serialize;
use tracing::instrument;

use crate::graph::build::IndicatorGraph;

/// Structural metrics of one indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NodeMetrics {
    pub degree: f64,
    pub betweenness: f64,
    pub clustering: f64,
}

/// Per-indicator metrics, kept apart from the graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CentralityMap {
    by_id: HashMap<String, NodeMetrics>,
}

impl CentralityMap {
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&NodeMetrics> {
        self.by_id.get(id)
    }

    /// Metrics for `id`, or all zeros if the id is unknown.
    #[must_use]
    pub fn get_or_default(&self, id: &str) -> NodeMetrics {
        self.by_id.get(id).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NodeMetrics)> {
        self.by_id.iter().map(|(id, m)| (id.as_str(), m))
    }
}

/// Compute degree, betweenness, and clustering for every indicator.
///
/// An empty graph yields an empty map.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count(), edges = g.edge_count()))]
pub fn centrality(g: &IndicatorGraph) -> CentralityMap {
    if g.is_empty() {
        return CentralityMap::default();
    }

    let adjacency = g.adjacency();
    let degree = basic::degree_scores(&adjacency);
    let betweenness = betweenness::betweenness_scores(&adjacency);
    let clustering = basic::clustering_scores(&adjacency);

    let by_id = g
        .indicators()
        .enumerate()
        .map(|(i, indicator)| {
            (
                indicator.id.clone(),
                NodeMetrics {
                    degree: degree[i],
                    betweenness: betweenness[i],
                    clustering: clustering[i],
                },
            )
        })
        .collect();

    CentralityMap { by_id }
}
