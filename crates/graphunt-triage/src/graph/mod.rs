//! Relationship graph module.
//!
//! # Overview
//!
//! This module turns the collector's flat node and edge tables into a
//! petgraph-based simple undirected graph. The graph feeds the centrality
//! metrics and the layout engine, both of which only read it.
//!
//! ## Pipeline
//!
//! ```text
//! node table + edge table
//!        ↓  build::IndicatorGraph::build_with_report()
//! IndicatorGraph (UnGraph, deduplicated, no self-loops)
//!        ↓  stats::GraphStats::from_graph()
//! GraphStats (density, component count, isolated nodes, …)
//! ```
//!
//! ## Typical Usage
//!
//! ```rust,ignore
//! use graphunt_triage::graph::{IndicatorGraph, GraphStats};
//!
//! let (graph, report) = IndicatorGraph::build_with_report(&nodes, &edges);
//! let stats = GraphStats::from_graph(&graph);
//!
//! println!("nodes={} edges={} density={:.3} components={}",
//!     stats.node_count, stats.edge_count, stats.density, stats.component_count);
//! ```

pub mod build;
pub mod stats;

// Re-export primary types at module level for convenience.
pub use build::{BuildReport, Indicator, IndicatorGraph};
pub use stats::GraphStats;
