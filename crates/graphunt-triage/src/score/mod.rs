//! C2 scoring: weighted composite of centrality metrics, global min-max
//! normalization, and ranking.

pub mod composite;
pub mod table;

pub use composite::{
    BETWEENNESS_WEIGHT, C2Weights, CLUSTERING_WEIGHT, DEGREE_WEIGHT, composite_score,
    normalize_metric,
};
pub use table::{Heatmap, PERCENTILE_COLUMNS, ScoreRecord, ScoreTable, score, score_with_weights};
