//! `graphunt analyze`: full batch (statistics, ranking, heatmap, layout).

use std::io::{self, Write};
use std::path::Path;

use clap::Args;
use graphunt_triage::analyze;
use graphunt_triage::pipeline::AnalysisSummary;

use crate::cmd::score::write_score_rows;
use crate::cmd::{prepare, reject};
use crate::input::InputArgs;
use crate::output::{OutputMode, pretty_kv, pretty_rule, pretty_section, render};

/// Arguments for `graphunt analyze`.
#[derive(Args, Debug, Default)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Layout seed (default: `[layout] seed`).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of ranked rows to print (default: `[report] top_n`).
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,
}

/// Execute `graphunt analyze`.
///
/// # Errors
///
/// Returns an error if input or config cannot be loaded, the batch is
/// rejected, or output rendering fails.
pub fn run_analyze(
    args: &AnalyzeArgs,
    output: OutputMode,
    project_root: &Path,
) -> anyhow::Result<()> {
    let prepared = prepare(&args.input, output, project_root)?;
    let mut config = prepared.config;
    if let Some(seed) = args.seed {
        config.layout = config.layout.with_seed(seed);
    }
    if let Some(top) = args.top {
        config.report.top_n = top;
    }

    let analysis = match analyze(&prepared.tables.nodes, &prepared.tables.edges, &config) {
        Ok(analysis) => analysis,
        Err(e) => return reject(output, &e),
    };

    let summary = analysis.summary(&config);
    render(output, &summary, |summary, w| render_analysis_human(summary, w))
}

fn render_analysis_human(summary: &AnalysisSummary<'_>, w: &mut dyn Write) -> io::Result<()> {
    let stats = summary.stats;
    pretty_section(w, "Graph")?;
    pretty_kv(w, "Nodes", stats.node_count.to_string())?;
    pretty_kv(w, "Edges", stats.edge_count.to_string())?;
    pretty_kv(w, "Density", format!("{:.4}", stats.density))?;
    pretty_kv(w, "Components", stats.component_count.to_string())?;
    pretty_kv(w, "Isolated", stats.isolated_node_count.to_string())?;
    pretty_kv(w, "Max degree", stats.max_degree.to_string())?;
    if !stats.category_counts.is_empty() {
        let categories: Vec<String> = stats
            .category_counts
            .iter()
            .map(|(category, count)| format!("{category}={count}"))
            .collect();
        pretty_kv(w, "Categories", categories.join(" "))?;
    }
    pretty_kv(w, "Topology", summary.content_hash)?;

    let report = summary.report;
    let dropped = report.skipped_nodes + report.skipped_edges + report.self_loops;
    if dropped > 0 || report.duplicate_edges > 0 || report.merged_nodes > 0 {
        writeln!(w)?;
        pretty_section(w, "Input")?;
        pretty_kv(w, "Skipped", format!(
            "{} nodes, {} edges, {} self-loops",
            report.skipped_nodes, report.skipped_edges, report.self_loops
        ))?;
        pretty_kv(w, "Collapsed", format!(
            "{} duplicate edges, {} repeated nodes",
            report.duplicate_edges, report.merged_nodes
        ))?;
        pretty_kv(w, "Implicit", report.implicit_nodes.to_string())?;
    }

    writeln!(w)?;
    pretty_section(w, &format!("Top {} by C2 score", summary.top.len()))?;
    write_score_rows(w, summary.top)?;
    pretty_rule(w)?;
    pretty_kv(w, "Layout", format!(
        "{} positions, seed {}",
        summary.layout.len(),
        summary.layout.seed
    ))
}
