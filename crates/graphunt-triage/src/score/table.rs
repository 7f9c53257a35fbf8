//! Ranked C2 score table.
//!
//! Scoring is a batch operation: percentile columns are min-max normalized
//! over the whole indicator set, so a row is only meaningful once every
//! indicator in the batch has been scored.

use std::collections::HashMap;

use graphunt_core::model::Category;
use serde::Serialize;
use tracing::instrument;

use crate::graph::build::IndicatorGraph;
use crate::metrics::CentralityMap;
use crate::score::composite::{C2Weights, composite_score, normalize_metric};

/// Names of the normalized columns, in heatmap row order.
pub const PERCENTILE_COLUMNS: [&str; 4] =
    ["degree_pct", "betweenness_pct", "clustering_pct", "c2_score_pct"];

/// One scored indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub category: Category,
    pub degree: f64,
    pub betweenness: f64,
    pub clustering: f64,
    pub c2_score: f64,
    pub degree_pct: f64,
    pub betweenness_pct: f64,
    pub clustering_pct: f64,
    pub c2_score_pct: f64,
}

impl ScoreRecord {
    /// Normalized columns in [`PERCENTILE_COLUMNS`] order.
    #[must_use]
    pub const fn percentiles(&self) -> [f64; 4] {
        [
            self.degree_pct,
            self.betweenness_pct,
            self.clustering_pct,
            self.c2_score_pct,
        ]
    }
}

/// Score rows sorted by descending `c2_score`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ScoreTable {
    rows: Vec<ScoreRecord>,
}

/// Normalized metrics of the top-ranked indicators, laid out metric ×
/// indicator for a heatmap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heatmap {
    /// Column labels (indicator ids), in rank order.
    pub indicators: Vec<String>,
    /// Row labels.
    pub metrics: Vec<String>,
    /// `values[metric][indicator]`.
    pub values: Vec<Vec<f64>>,
}

impl ScoreTable {
    #[must_use]
    pub fn rows(&self) -> &[ScoreRecord] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The `n` highest-ranked rows (fewer if the table is shorter).
    #[must_use]
    pub fn top(&self, n: usize) -> &[ScoreRecord] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Linear scan; use [`ScoreTable::c2_by_id`] for bulk lookups.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ScoreRecord> {
        self.rows.iter().find(|row| row.id == id)
    }

    /// Composite score per indicator id.
    #[must_use]
    pub fn c2_by_id(&self) -> HashMap<&str, f64> {
        self.rows
            .iter()
            .map(|row| (row.id.as_str(), row.c2_score))
            .collect()
    }

    /// Heatmap matrix for the first `max_rows` ranked indicators.
    #[must_use]
    pub fn heatmap(&self, max_rows: usize) -> Heatmap {
        let top = self.top(max_rows);
        let indicators = top.iter().map(|row| row.id.clone()).collect();
        let values = (0..PERCENTILE_COLUMNS.len())
            .map(|m| top.iter().map(|row| row.percentiles()[m]).collect())
            .collect();

        Heatmap {
            indicators,
            metrics: PERCENTILE_COLUMNS.iter().map(ToString::to_string).collect(),
            values,
        }
    }
}

/// Score every indicator with the default weights.
#[must_use]
pub fn score(g: &IndicatorGraph, metrics: &CentralityMap) -> ScoreTable {
    score_with_weights(g, metrics, &C2Weights::DEFAULT)
}

/// Score every indicator and rank by composite score.
///
/// Rows start in node-index order; the descending sort is stable, so ties
/// keep that order.
#[must_use]
#[instrument(skip(g, metrics), fields(nodes = g.node_count()))]
pub fn score_with_weights(
    g: &IndicatorGraph,
    metrics: &CentralityMap,
    weights: &C2Weights,
) -> ScoreTable {
    let mut rows: Vec<ScoreRecord> = g
        .indicators()
        .map(|indicator| {
            let m = metrics.get_or_default(&indicator.id);
            ScoreRecord {
                id: indicator.id.clone(),
                category: indicator.category.clone(),
                degree: m.degree,
                betweenness: m.betweenness,
                clustering: m.clustering,
                c2_score: composite_score(&m, weights),
                degree_pct: 0.0,
                betweenness_pct: 0.0,
                clustering_pct: 0.0,
                c2_score_pct: 0.0,
            }
        })
        .collect();

    if rows.is_empty() {
        return ScoreTable::default();
    }

    let column = |f: fn(&ScoreRecord) -> f64| {
        normalize_metric(&rows.iter().map(f).collect::<Vec<_>>())
    };
    let degree_pct = column(|r| r.degree);
    let betweenness_pct = column(|r| r.betweenness);
    let clustering_pct = column(|r| r.clustering);
    let c2_pct = column(|r| r.c2_score);

    for (i, row) in rows.iter_mut().enumerate() {
        row.degree_pct = degree_pct[i];
        row.betweenness_pct = betweenness_pct[i];
        row.clustering_pct = clustering_pct[i];
        row.c2_score_pct = c2_pct[i];
    }

    rows.sort_by(|a, b| b.c2_score.total_cmp(&a.c2_score));

    ScoreTable { rows }
}
