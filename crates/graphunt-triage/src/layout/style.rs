//! Marker attributes for rendering collaborators.
//!
//! The network view draws each indicator with a symbol chosen by category,
//! a size that grows with degree centrality, and a color driven by the C2
//! score. This module only computes those values; drawing is left to the
//! caller.

use graphunt_core::model::MarkerSymbol;
use serde::Serialize;

use crate::graph::build::IndicatorGraph;
use crate::metrics::CentralityMap;
use crate::score::ScoreTable;

/// Marker size of an indicator with no relationships.
pub const BASE_MARKER_SIZE: f64 = 8.0;
/// Extra marker size at degree centrality 1.0.
pub const DEGREE_MARKER_SIZE: f64 = 25.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeStyle {
    pub id: String,
    pub symbol: MarkerSymbol,
    pub size: f64,
    /// Color-scale value (the C2 score, 0.0 when unscored).
    pub color: f64,
}

/// Styles for every indicator, in node-index order.
#[must_use]
pub fn node_styles(g: &IndicatorGraph, metrics: &CentralityMap, scores: &ScoreTable) -> Vec<NodeStyle> {
    let c2 = scores.c2_by_id();
    g.indicators()
        .map(|indicator| {
            let degree = metrics.get_or_default(&indicator.id).degree;
            NodeStyle {
                id: indicator.id.clone(),
                symbol: indicator.category.symbol(),
                size: DEGREE_MARKER_SIZE.mul_add(degree, BASE_MARKER_SIZE),
                color: c2.get(indicator.id.as_str()).copied().unwrap_or(0.0),
            }
        })
        .collect()
}
