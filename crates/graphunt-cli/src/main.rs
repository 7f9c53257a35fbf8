#![forbid(unsafe_code)]

mod cmd;
mod input;
mod output;

use std::env;

use clap::{Parser, Subcommand};
use output::OutputMode;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "graphunt: rank threat indicators by C2 likelihood",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags.
    const fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Pretty
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank indicators by composite C2 score.
    Score(cmd::score::ScoreArgs),

    /// Compute seeded force-directed coordinates.
    Layout(cmd::layout::LayoutArgs),

    /// Run the full batch: statistics, ranking, heatmap, and layout.
    Analyze(cmd::analyze::AnalyzeArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("GRAPHUNT_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "graphunt=debug,info"
        } else {
            "graphunt=info,warn"
        })
    });

    let format = env::var("GRAPHUNT_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let project_root = env::current_dir()?;
    let output = cli.output_mode();
    debug!(?output, "starting");

    match cli.command {
        Commands::Score(ref args) => cmd::score::run_score(args, output, &project_root),
        Commands::Layout(ref args) => cmd::layout::run_layout(args, output, &project_root),
        Commands::Analyze(ref args) => cmd::analyze::run_analyze(args, output, &project_root),
    }
}
