//! `graphunt layout`: seeded force-directed coordinates.

use std::io::{self, Write};
use std::path::Path;

use clap::Args;
use graphunt_triage::check_limits;
use graphunt_triage::graph::IndicatorGraph;
use graphunt_triage::layout::{Layout, spring_layout};

use crate::cmd::{prepare, reject};
use crate::input::InputArgs;
use crate::output::{OutputMode, pretty_kv, pretty_section, render};

/// Arguments for `graphunt layout`.
#[derive(Args, Debug, Default)]
pub struct LayoutArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Layout seed (default: `[layout] seed`).
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Execute `graphunt layout`.
///
/// # Errors
///
/// Returns an error if input or config cannot be loaded, the batch exceeds
/// the configured limits, or output rendering fails.
pub fn run_layout(
    args: &LayoutArgs,
    output: OutputMode,
    project_root: &Path,
) -> anyhow::Result<()> {
    let prepared = prepare(&args.input, output, project_root)?;
    let mut config = prepared.config;
    if let Some(seed) = args.seed {
        config.layout = config.layout.with_seed(seed);
    }
    if let Err(e) = config.validate() {
        return reject(output, &e);
    }

    let graph = IndicatorGraph::build(&prepared.tables.nodes, &prepared.tables.edges);
    if let Err(e) = check_limits(&graph, &config.limits) {
        return reject(output, &e);
    }

    let layout = spring_layout(&graph, &config.layout);
    render(output, &layout, |layout, w| render_layout_human(layout, w))
}

fn render_layout_human(layout: &Layout, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Layout")?;
    pretty_kv(w, "Seed", layout.seed.to_string())?;
    pretty_kv(w, "Topology", &layout.content_hash)?;
    writeln!(w)?;
    write_positions(w, layout)
}

/// One `id  x  y` line per indicator, in id order.
pub fn write_positions(w: &mut dyn Write, layout: &Layout) -> io::Result<()> {
    if layout.is_empty() {
        return writeln!(w, "(no indicators)");
    }
    let id_width = layout.positions.keys().map(String::len).max().unwrap_or(2).clamp(2, 48);
    for (id, point) in &layout.positions {
        writeln!(w, "{id:<id_width$}  {:>9.5}  {:>9.5}", point.x, point.y)?;
    }
    Ok(())
}
