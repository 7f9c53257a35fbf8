//! Composite score sanity tests: weighting, global normalization, ranking
//! determinism, and the degenerate normalization fallback.

use graphunt_core::model::{EdgeRecord, NodeRecord};
use graphunt_triage::graph::IndicatorGraph;
use graphunt_triage::metrics::centrality;
use graphunt_triage::score::{
    BETWEENNESS_WEIGHT, C2Weights, CLUSTERING_WEIGHT, DEGREE_WEIGHT, ScoreTable, normalize_metric,
    score,
};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn score_edges(nodes: &[NodeRecord], edges: &[(String, String)]) -> ScoreTable {
    let edges: Vec<EdgeRecord> = edges
        .iter()
        .map(|(a, b)| EdgeRecord::new(a.clone(), b.clone()))
        .collect();
    let g = IndicatorGraph::build(nodes, &edges);
    score(&g, &centrality(&g))
}

fn pairs(edges: &[(&str, &str)]) -> Vec<(String, String)> {
    edges
        .iter()
        .map(|(a, b)| ((*a).to_string(), (*b).to_string()))
        .collect()
}

/// Two samples sharing one C2 server, plus a side infrastructure cluster.
fn campaign_edges() -> Vec<(String, String)> {
    pairs(&[
        ("hash_demo_a", "example.com"),
        ("hash_demo_a", "8.8.8.8"),
        ("hash_demo_a", "http://example.com/path"),
        ("hash_demo_b", "malicious.test"),
        ("hash_demo_b", "8.8.8.8"),
    ])
}

// ---------------------------------------------------------------------------
// Fixed policy
// ---------------------------------------------------------------------------

#[test]
fn weights_are_the_documented_policy() {
    assert!((DEGREE_WEIGHT - 0.45).abs() < f64::EPSILON);
    assert!((BETWEENNESS_WEIGHT - 0.45).abs() < f64::EPSILON);
    assert!((CLUSTERING_WEIGHT - 0.10).abs() < f64::EPSILON);
    assert_eq!(C2Weights::default(), C2Weights::DEFAULT);
}

// ---------------------------------------------------------------------------
// End-to-end example
// ---------------------------------------------------------------------------

#[test]
fn two_indicator_example_uses_degenerate_fallback() {
    let nodes = vec![
        NodeRecord::new("hash_demo_a", "hash"),
        NodeRecord::new("example.com", "domain"),
    ];
    let table = score_edges(&nodes, &pairs(&[("hash_demo_a", "example.com")]));

    assert_eq!(table.len(), 2);
    for row in table.rows() {
        assert!((row.degree - 1.0).abs() < 1e-12);
        assert!(row.betweenness.abs() < 1e-12);
        assert!(row.clustering.abs() < 1e-12);
        assert!((row.c2_score - 0.45).abs() < 1e-12, "got {}", row.c2_score);
        assert_eq!(row.percentiles(), [0.0; 4]);
    }
    // Tie keeps node-table order.
    assert_eq!(table.rows()[0].id, "hash_demo_a");
    assert_eq!(table.rows()[1].id, "example.com");
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

#[test]
fn shared_infrastructure_ranks_first() {
    let table = score_edges(&[], &campaign_edges());
    let ids: Vec<&str> = table.rows().iter().map(|r| r.id.as_str()).collect();

    // hash_demo_a has the highest degree and sits on most paths.
    assert_eq!(ids[0], "hash_demo_a");
    // 8.8.8.8 bridges both samples.
    assert_eq!(ids[1], "8.8.8.8");

    let scores: Vec<f64> = table.rows().iter().map(|r| r.c2_score).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]), "sorted descending: {scores:?}");
}

#[test]
fn percentile_extremes_are_zero_and_one() {
    let table = score_edges(&[], &campaign_edges());
    let first = &table.rows()[0];
    let last = &table.rows()[table.len() - 1];

    assert!((first.c2_score_pct - 1.0).abs() < 1e-12);
    assert!(last.c2_score_pct.abs() < 1e-12);

    let max_degree_pct = table
        .rows()
        .iter()
        .map(|r| r.degree_pct)
        .fold(f64::NEG_INFINITY, f64::max);
    assert!((max_degree_pct - 1.0).abs() < 1e-12);
}

#[test]
fn clustering_column_with_all_zeros_falls_back_to_zero() {
    // A tree has no triangles: every clustering value is 0.
    let table = score_edges(&[], &campaign_edges());
    assert!(table.rows().iter().all(|r| r.clustering_pct == 0.0));
}

#[test]
fn scoring_twice_is_identical() {
    let first = score_edges(&[], &campaign_edges());
    let second = score_edges(&[], &campaign_edges());
    assert_eq!(first, second);

    let a = serde_json::to_string(&first).expect("serialize");
    let b = serde_json::to_string(&second).expect("serialize");
    assert_eq!(a, b);
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

fn arb_edges() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((0u8..12, 0u8..12), 0..30).prop_map(|raw| {
        raw.into_iter()
            .map(|(a, b)| (format!("n{a}"), format!("n{b}")))
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_percentiles_stay_in_unit_interval(edges in arb_edges()) {
        let table = score_edges(&[], &edges);
        for row in table.rows() {
            for pct in row.percentiles() {
                prop_assert!((0.0..=1.0).contains(&pct), "{} out of range: {}", row.id, pct);
            }
        }
    }

    #[test]
    fn prop_table_is_sorted_and_complete(edges in arb_edges()) {
        let table = score_edges(&[], &edges);
        let g = IndicatorGraph::build(
            &[],
            &edges.iter().map(|(a, b)| EdgeRecord::new(a.clone(), b.clone())).collect::<Vec<_>>(),
        );
        prop_assert_eq!(table.len(), g.node_count());
        for pair in table.rows().windows(2) {
            prop_assert!(pair[0].c2_score >= pair[1].c2_score);
        }
    }

    #[test]
    fn prop_normalize_hits_both_ends(values in prop::collection::vec(-1e6f64..1e6, 2..40)) {
        let normalized = normalize_metric(&values);
        prop_assert_eq!(normalized.len(), values.len());

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if max - min > f64::EPSILON {
            let lo = normalized.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = normalized.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(lo.abs() < 1e-12);
            prop_assert!((hi - 1.0).abs() < 1e-12);
        } else {
            prop_assert!(normalized.iter().all(|v| *v == 0.0));
        }
    }
}
