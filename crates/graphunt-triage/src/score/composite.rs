use serde::{Deserialize, Serialize};

use crate::metrics::NodeMetrics;

/// Weight of degree centrality in the C2 score.
pub const DEGREE_WEIGHT: f64 = 0.45;
/// Weight of betweenness centrality in the C2 score.
pub const BETWEENNESS_WEIGHT: f64 = 0.45;
/// Weight of the clustering coefficient in the C2 score.
pub const CLUSTERING_WEIGHT: f64 = 0.10;

/// Decimal digits kept in the composite score.
pub const SCORE_DECIMALS: i32 = 6;

/// Weights for the composite formula:
///
/// `C2(v) = degree_w*DC + betweenness_w*BC + clustering_w*CC`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct C2Weights {
    pub degree: f64,
    pub betweenness: f64,
    pub clustering: f64,
}

impl C2Weights {
    pub const DEFAULT: Self = Self {
        degree: DEGREE_WEIGHT,
        betweenness: BETWEENNESS_WEIGHT,
        clustering: CLUSTERING_WEIGHT,
    };
}

impl Default for C2Weights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Weighted sum of the three metrics, rounded to [`SCORE_DECIMALS`] digits.
#[must_use]
pub fn composite_score(metrics: &NodeMetrics, weights: &C2Weights) -> f64 {
    let raw = (weights.degree * metrics.degree)
        + (weights.betweenness * metrics.betweenness)
        + (weights.clustering * metrics.clustering);
    round_to(raw, SCORE_DECIMALS)
}

/// Min-max normalization that maps raw metric values to `[0, 1]`.
///
/// The whole column is scanned on every call; nothing is fitted or cached.
/// If all values are equal (including a single-element slice), all outputs
/// are `0.0`.
#[must_use]
pub fn normalize_metric(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if !range.is_finite() || range.abs() <= f64::EPSILON {
        return vec![0.0; values.len()];
    }

    values
        .iter()
        .map(|&value| normalize_unit((value - min) / range))
        .collect()
}

fn normalize_unit(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }

    value.clamp(0.0, 1.0)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
