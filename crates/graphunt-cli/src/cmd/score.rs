//! `graphunt score`: rank indicators by composite C2 score.

use std::io::{self, Write};
use std::path::Path;

use clap::Args;
use graphunt_triage::check_limits;
use graphunt_triage::graph::{BuildReport, IndicatorGraph};
use graphunt_triage::metrics::centrality;
use graphunt_triage::score::{ScoreRecord, score};
use serde::Serialize;

use crate::cmd::{prepare, reject};
use crate::input::InputArgs;
use crate::output::{OutputMode, fmt_score, pretty_kv, pretty_section, render};

/// Arguments for `graphunt score`.
#[derive(Args, Debug, Default)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Number of ranked rows to print (default: `[report] top_n`).
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,
}

/// Report payload for `graphunt score`.
#[derive(Debug, Serialize)]
pub struct ScoreReport<'a> {
    pub content_hash: &'a str,
    pub indicators: usize,
    pub report: BuildReport,
    pub rows: &'a [ScoreRecord],
}

/// Execute `graphunt score`.
///
/// # Errors
///
/// Returns an error if input or config cannot be loaded, the batch exceeds
/// the configured limits, or output rendering fails.
pub fn run_score(args: &ScoreArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let prepared = prepare(&args.input, output, project_root)?;
    let config = prepared.config;
    if let Err(e) = config.validate() {
        return reject(output, &e);
    }

    let (graph, report) =
        IndicatorGraph::build_with_report(&prepared.tables.nodes, &prepared.tables.edges);
    if let Err(e) = check_limits(&graph, &config.limits) {
        return reject(output, &e);
    }

    let table = score(&graph, &centrality(&graph));
    let payload = ScoreReport {
        content_hash: &graph.content_hash,
        indicators: table.len(),
        report,
        rows: table.top(args.top.unwrap_or(config.report.top_n)),
    };

    render(output, &payload, |payload, w| render_score_human(payload, w))
}

fn render_score_human(payload: &ScoreReport<'_>, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "C2 ranking")?;
    pretty_kv(w, "Indicators", payload.indicators.to_string())?;
    pretty_kv(w, "Topology", payload.content_hash)?;
    writeln!(w)?;
    write_score_rows(w, payload.rows)
}

/// Aligned table of ranked rows, shared with `graphunt analyze`.
pub fn write_score_rows(w: &mut dyn Write, rows: &[ScoreRecord]) -> io::Result<()> {
    if rows.is_empty() {
        return writeln!(w, "(no indicators)");
    }

    let id_width = rows.iter().map(|r| r.id.len()).max().unwrap_or(2).clamp(2, 48);
    writeln!(
        w,
        "{:>4}  {:<id_width$}  {:<8}  {:>7}  {:>7}  {:>7}  {:>7}",
        "#", "ID", "TYPE", "C2", "DEGREE", "BETW", "CLUST"
    )?;
    for (rank, row) in rows.iter().enumerate() {
        writeln!(
            w,
            "{:>4}  {:<id_width$}  {:<8}  {:>7}  {:>7}  {:>7}  {:>7}",
            rank + 1,
            truncate(&row.id, id_width),
            row.category.as_str(),
            fmt_score(row.c2_score),
            fmt_score(row.degree),
            fmt_score(row.betweenness),
            fmt_score(row.clustering),
        )?;
    }
    Ok(())
}

fn truncate(id: &str, width: usize) -> String {
    if id.chars().count() <= width {
        return id.to_string();
    }
    let mut out: String = id.chars().take(width.saturating_sub(1)).collect();
    out.push('~');
    out
}
