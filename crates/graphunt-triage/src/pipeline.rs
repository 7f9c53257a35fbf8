//! Batch analysis: build → size check → (centrality ∥ layout) → score.
//!
//! The centrality pass and the layout pass only read the graph, so they run
//! side by side on the rayon pool. Scoring waits for the centrality pass,
//! since its percentile columns need every raw metric in the batch.

use graphunt_core::config::{AnalysisConfig, LimitsConfig};
use graphunt_core::error::AnalysisError;
use graphunt_core::model::{EdgeRecord, NodeRecord};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::graph::{BuildReport, GraphStats, IndicatorGraph};
use crate::layout::{Layout, NodeStyle, node_styles, spring_layout};
use crate::metrics::{CentralityMap, centrality};
use crate::score::{Heatmap, ScoreRecord, ScoreTable, score};

/// Everything one batch produces.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub graph: IndicatorGraph,
    pub report: BuildReport,
    pub stats: GraphStats,
    pub metrics: CentralityMap,
    pub scores: ScoreTable,
    pub layout: Layout,
}

impl Analysis {
    /// Marker styles for the network view.
    #[must_use]
    pub fn styles(&self) -> Vec<NodeStyle> {
        node_styles(&self.graph, &self.metrics, &self.scores)
    }

    /// Serializable summary for JSON output.
    #[must_use]
    pub fn summary(&self, config: &AnalysisConfig) -> AnalysisSummary<'_> {
        AnalysisSummary {
            content_hash: &self.graph.content_hash,
            stats: &self.stats,
            report: &self.report,
            scores: &self.scores,
            top: self.scores.top(config.report.top_n),
            heatmap: self.scores.heatmap(config.report.heatmap_rows),
            layout: &self.layout,
            styles: self.styles(),
        }
    }
}

/// Borrowed view of an [`Analysis`] for serialization.
#[derive(Debug, Serialize)]
pub struct AnalysisSummary<'a> {
    pub content_hash: &'a str,
    pub stats: &'a GraphStats,
    pub report: &'a BuildReport,
    pub scores: &'a ScoreTable,
    pub top: &'a [ScoreRecord],
    pub heatmap: Heatmap,
    pub layout: &'a Layout,
    pub styles: Vec<NodeStyle>,
}

/// Reject graphs beyond the configured limits.
///
/// # Errors
///
/// Returns [`AnalysisError::GraphTooLarge`] if either count exceeds its limit.
pub fn check_limits(g: &IndicatorGraph, limits: &LimitsConfig) -> Result<(), AnalysisError> {
    let (nodes, edges) = (g.node_count(), g.edge_count());
    if nodes > limits.max_nodes || edges > limits.max_edges {
        return Err(AnalysisError::GraphTooLarge {
            nodes,
            edges,
            max_nodes: limits.max_nodes,
            max_edges: limits.max_edges,
        });
    }
    Ok(())
}

/// Run the full batch.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidConfig`] if `config` fails validation and
/// [`AnalysisError::GraphTooLarge`] if the built graph exceeds the limits.
/// Malformed records and empty input are not errors.
#[instrument(skip_all, fields(node_records = nodes.len(), edge_records = edges.len()))]
pub fn analyze(
    nodes: &[NodeRecord],
    edges: &[EdgeRecord],
    config: &AnalysisConfig,
) -> Result<Analysis, AnalysisError> {
    config.validate()?;

    let (graph, report) = IndicatorGraph::build_with_report(nodes, edges);

    if let Err(err) = check_limits(&graph, &config.limits) {
        warn!(code = %err.code(), "{err}");
        return Err(err);
    }

    let (metrics, layout) = rayon::join(
        || centrality(&graph),
        || spring_layout(&graph, &config.layout),
    );
    let scores = score(&graph, &metrics);
    let stats = GraphStats::from_graph(&graph);

    info!(
        nodes = stats.node_count,
        edges = stats.edge_count,
        components = stats.component_count,
        top = scores.rows().first().map_or("", |row| row.id.as_str()),
        "analysis complete"
    );

    Ok(Analysis {
        graph,
        report,
        stats,
        metrics,
        scores,
        layout,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_batch_is_not_an_error() {
        let analysis = analyze(&[], &[], &AnalysisConfig::default()).expect("empty batch");
        assert!(analysis.graph.is_empty());
        assert!(analysis.scores.is_empty());
        assert!(analysis.layout.is_empty());
        assert!(analysis.metrics.is_empty());
    }

    #[test]
    fn oversized_batch_is_rejected_whole() {
        let mut config = AnalysisConfig::default();
        config.limits.max_nodes = 2;
        let edges = vec![EdgeRecord::new("a", "b"), EdgeRecord::new("b", "c")];

        let err = analyze(&[], &edges, &config).expect_err("3 nodes > limit 2");
        assert_eq!(
            err,
            AnalysisError::GraphTooLarge {
                nodes: 3,
                edges: 2,
                max_nodes: 2,
                max_edges: config.limits.max_edges,
            }
        );
    }

    #[test]
    fn edge_limit_is_enforced() {
        let mut config = AnalysisConfig::default();
        config.limits.max_edges = 1;
        let edges = vec![EdgeRecord::new("a", "b"), EdgeRecord::new("b", "c")];
        assert!(matches!(
            analyze(&[], &edges, &config),
            Err(AnalysisError::GraphTooLarge { .. })
        ));
    }

    #[test]
    fn invalid_config_is_rejected_before_building() {
        let mut config = AnalysisConfig::default();
        config.layout.iterations = 0;
        assert!(matches!(
            analyze(&[], &[], &config),
            Err(AnalysisError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn summary_respects_report_config() {
        let mut config = AnalysisConfig::default();
        config.report.top_n = 1;
        config.report.heatmap_rows = 2;
        let edges = vec![
            EdgeRecord::new("hub", "a"),
            EdgeRecord::new("hub", "b"),
            EdgeRecord::new("hub", "c"),
        ];
        let analysis = analyze(&[], &edges, &config).expect("analyze");
        let summary = analysis.summary(&config);
        assert_eq!(summary.top.len(), 1);
        assert_eq!(summary.top[0].id, "hub");
        assert_eq!(summary.heatmap.indicators.len(), 2);
        assert_eq!(summary.styles.len(), 4);
    }
}
