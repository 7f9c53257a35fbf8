//! Graph construction from node and edge tables.
//!
//! # Overview
//!
//! Collectors supply two flat tables. This module turns them into a simple
//! undirected [`petgraph`] graph of indicators:
//!
//! - Node records without a usable `id` are skipped.
//! - Edge records without both `src` and `dst` are skipped.
//! - An edge endpoint missing from the node table becomes an implicit node
//!   of category `unknown`.
//! - Parallel edges (in either orientation) collapse to one edge.
//! - Self-loops are dropped; the endpoint node is still created.
//!
//! None of these conditions is an error. They are counted in a
//! [`BuildReport`] so callers can log how noisy the input was.
//!
//! ## Topology Hash
//!
//! Each graph carries a BLAKE3 hash of its sorted node ids and sorted
//! normalized edge pairs. Two graphs with the same hash have the same
//! topology regardless of record order. The layout engine works in the same
//! sorted-id order, so equal hashes and an equal seed give equal coordinates.

#![allow(clippy::module_name_repetitions)]

use std::collections::{BTreeMap, HashMap};

use graphunt_core::model::{Category, EdgeRecord, NodeRecord};
use petgraph::graph::{NodeIndex, UnGraph};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

// ---------------------------------------------------------------------------
// Indicator
// ---------------------------------------------------------------------------

/// A vertex of the relationship graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Indicator {
    pub id: String,
    #[serde(rename = "type")]
    pub category: Category,
    /// Extra attributes from the node table, kept verbatim.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, Value>,
}

impl Indicator {
    fn implicit(id: &str) -> Self {
        Self {
            id: id.to_string(),
            category: Category::Unknown,
            attributes: BTreeMap::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// BuildReport
// ---------------------------------------------------------------------------

/// Counts of records the builder dropped or folded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Node records with a missing or empty `id`.
    pub skipped_nodes: usize,
    /// Node records whose `id` was already present (merged).
    pub merged_nodes: usize,
    /// Edge records with a missing or empty endpoint.
    pub skipped_edges: usize,
    /// Edge records that duplicated an existing edge.
    pub duplicate_edges: usize,
    /// Edge records with `src == dst`.
    pub self_loops: usize,
    /// Nodes created only because an edge referenced them.
    pub implicit_nodes: usize,
}

// ---------------------------------------------------------------------------
// IndicatorGraph
// ---------------------------------------------------------------------------

/// A simple undirected relationship graph.
///
/// Node indices follow insertion order: node-table order first, then
/// implicit nodes in the order edges referenced them. The metrics modules
/// iterate in this order; the layout engine re-sorts by id first.
#[derive(Debug, Clone)]
pub struct IndicatorGraph {
    /// Undirected graph: nodes = indicators, edges = relationships.
    pub graph: UnGraph<Indicator, ()>,
    /// Mapping from indicator id to petgraph `NodeIndex`.
    pub node_map: HashMap<String, NodeIndex>,
    /// BLAKE3 hash of the topology.
    pub content_hash: String,
}

impl IndicatorGraph {
    /// Build a graph from node and edge tables, discarding the report.
    #[must_use]
    pub fn build(nodes: &[NodeRecord], edges: &[EdgeRecord]) -> Self {
        Self::build_with_report(nodes, edges).0
    }

    /// Build a graph from node and edge tables.
    #[must_use]
    #[instrument(skip_all, fields(nodes = nodes.len(), edges = edges.len()))]
    pub fn build_with_report(nodes: &[NodeRecord], edges: &[EdgeRecord]) -> (Self, BuildReport) {
        let mut report = BuildReport::default();
        let mut graph = UnGraph::<Indicator, ()>::with_capacity(nodes.len(), edges.len());
        let mut node_map: HashMap<String, NodeIndex> = HashMap::with_capacity(nodes.len());

        // Step 1: explicit nodes.
        for record in nodes {
            let Some(id) = record.accepted_id() else {
                report.skipped_nodes += 1;
                continue;
            };

            if let Some(&idx) = node_map.get(id) {
                report.merged_nodes += 1;
                merge_record(&mut graph[idx], record);
                continue;
            }

            let idx = graph.add_node(Indicator {
                id: id.to_string(),
                category: record.category(),
                attributes: record.attributes.clone(),
            });
            node_map.insert(id.to_string(), idx);
        }

        // Step 2: edges, creating implicit endpoints as needed.
        for record in edges {
            let Some((src, dst)) = record.endpoints() else {
                report.skipped_edges += 1;
                continue;
            };

            let a = ensure_node(&mut graph, &mut node_map, &mut report, src);
            let b = ensure_node(&mut graph, &mut node_map, &mut report, dst);

            if a == b {
                report.self_loops += 1;
                continue;
            }

            // `find_edge` on an undirected graph matches either orientation.
            if graph.find_edge(a, b).is_some() {
                report.duplicate_edges += 1;
                continue;
            }

            graph.add_edge(a, b, ());
        }

        let content_hash = compute_topology_hash(&graph);

        debug!(
            node_count = graph.node_count(),
            edge_count = graph.edge_count(),
            skipped_nodes = report.skipped_nodes,
            merged_nodes = report.merged_nodes,
            skipped_edges = report.skipped_edges,
            duplicate_edges = report.duplicate_edges,
            self_loops = report.self_loops,
            implicit_nodes = report.implicit_nodes,
            "built indicator graph"
        );

        (
            Self {
                graph,
                node_map,
                content_hash,
            },
            report,
        )
    }

    /// Return the number of nodes (indicators) in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of edges (relationships) in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Look up the `NodeIndex` for an indicator id.
    #[must_use]
    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_map.get(id).copied()
    }

    /// Look up an indicator by id.
    #[must_use]
    pub fn indicator(&self, id: &str) -> Option<&Indicator> {
        self.node_index(id).and_then(|idx| self.graph.node_weight(idx))
    }

    /// Indicators in node-index order.
    pub fn indicators(&self) -> impl Iterator<Item = &Indicator> {
        self.graph.node_weights()
    }

    /// Whether an undirected edge joins `a` and `b`.
    #[must_use]
    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        match (self.node_index(a), self.node_index(b)) {
            (Some(ia), Some(ib)) => self.graph.contains_edge(ia, ib),
            _ => false,
        }
    }

    /// Neighbor lists indexed by node index, sorted ascending.
    ///
    /// The metrics and layout passes work on this plain adjacency form.
    #[must_use]
    pub fn adjacency(&self) -> Vec<Vec<usize>> {
        let mut adjacency = vec![Vec::new(); self.graph.node_count()];
        for idx in self.graph.node_indices() {
            let neighbors = &mut adjacency[idx.index()];
            neighbors.extend(self.graph.neighbors(idx).map(NodeIndex::index));
            neighbors.sort_unstable();
        }
        adjacency
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn ensure_node(
    graph: &mut UnGraph<Indicator, ()>,
    node_map: &mut HashMap<String, NodeIndex>,
    report: &mut BuildReport,
    id: &str,
) -> NodeIndex {
    if let Some(&idx) = node_map.get(id) {
        return idx;
    }
    report.implicit_nodes += 1;
    let idx = graph.add_node(Indicator::implicit(id));
    node_map.insert(id.to_string(), idx);
    idx
}

/// A repeated node id updates the existing vertex: a non-empty `type`
/// replaces the category and extra attributes overwrite by key.
fn merge_record(indicator: &mut Indicator, record: &NodeRecord) {
    if record.kind.as_deref().is_some_and(|k| !k.is_empty()) {
        indicator.category = record.category();
    }
    for (key, value) in &record.attributes {
        indicator.attributes.insert(key.clone(), value.clone());
    }
}

/// Compute a BLAKE3 hash of the sorted node ids and sorted edge pairs.
fn compute_topology_hash(graph: &UnGraph<Indicator, ()>) -> String {
    let mut ids: Vec<&str> = graph.node_weights().map(|n| n.id.as_str()).collect();
    ids.sort_unstable();

    let mut pairs: Vec<(&str, &str)> = graph
        .edge_indices()
        .filter_map(|e| graph.edge_endpoints(e))
        .map(|(a, b)| {
            let (a, b) = (graph[a].id.as_str(), graph[b].id.as_str());
            if a <= b { (a, b) } else { (b, a) }
        })
        .collect();
    pairs.sort_unstable();

    let mut hasher = blake3::Hasher::new();
    for id in ids {
        hasher.update(id.as_bytes());
        hasher.update(b"\x00");
    }
    hasher.update(b"\x01");
    for (a, b) in pairs {
        hasher.update(a.as_bytes());
        hasher.update(b"\x00");
        hasher.update(b.as_bytes());
        hasher.update(b"\x00");
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
