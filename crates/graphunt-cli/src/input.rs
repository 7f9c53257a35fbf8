//! Node and edge table loading.
//!
//! Tables are JSON arrays of objects. Elements that are not objects of the
//! expected shape are dropped with a warning; the builder applies the
//! per-record rules (missing ids, self-loops, duplicates) after that.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::Args;
use graphunt_core::model::{EdgeRecord, NodeRecord};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

/// Input selection shared by every analysis subcommand.
#[derive(Args, Debug, Default, Clone)]
pub struct InputArgs {
    /// JSON array of node records (`{"id", "type", ...}`).
    #[arg(long, value_name = "FILE", conflicts_with = "demo")]
    pub nodes: Option<PathBuf>,

    /// JSON array of edge records (`{"src", "dst", "relationship"}`).
    #[arg(
        long,
        value_name = "FILE",
        conflicts_with = "demo",
        required_unless_present = "demo"
    )]
    pub edges: Option<PathBuf>,

    /// Use the built-in two-sample demo campaign instead of files.
    #[arg(long)]
    pub demo: bool,

    /// Analysis config file (default: ./graphunt.toml, then the user config).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Loaded node and edge tables.
#[derive(Debug, Default)]
pub struct Tables {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

/// Load the tables selected by `args`.
///
/// # Errors
///
/// Returns an error if a file cannot be read or is not a JSON array.
pub fn load_tables(args: &InputArgs) -> Result<Tables> {
    if args.demo {
        debug!("using demo tables");
        return Ok(demo_tables());
    }

    let nodes = match args.nodes {
        Some(ref path) => load_records(path)?,
        None => Vec::new(),
    };
    let edges = match args.edges {
        Some(ref path) => load_records(path)?,
        None => Vec::new(),
    };
    Ok(Tables { nodes, edges })
}

/// Read a JSON array and keep the elements that deserialize as `T`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the top level is not an
/// array.
pub fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_records(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

fn parse_records<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>> {
    let elements: Vec<Value> =
        serde_json::from_str(raw).context("expected a JSON array of objects")?;
    let total = elements.len();

    let records: Vec<T> = elements
        .into_iter()
        .filter_map(|element| serde_json::from_value(element).ok())
        .collect();

    let dropped = total - records.len();
    if dropped > 0 {
        warn!(dropped, total, "ignored malformed records");
    }
    Ok(records)
}

/// Two malware samples sharing one C2 address.
pub fn demo_tables() -> Tables {
    let nodes = vec![
        NodeRecord::new("hash_demo_a", "hash"),
        NodeRecord::new("hash_demo_b", "hash"),
        NodeRecord::new("example.com", "domain"),
        NodeRecord::new("8.8.8.8", "ip"),
        NodeRecord::new("http://example.com/path", "url"),
        NodeRecord::new("malicious.test", "domain"),
    ];
    let edges = vec![
        EdgeRecord::new("hash_demo_a", "example.com").with_relationship("contacted_domains"),
        EdgeRecord::new("hash_demo_a", "8.8.8.8").with_relationship("contacted_ips"),
        EdgeRecord::new("hash_demo_a", "http://example.com/path")
            .with_relationship("contacted_urls"),
        EdgeRecord::new("hash_demo_b", "malicious.test").with_relationship("contacted_domains"),
        EdgeRecord::new("hash_demo_b", "8.8.8.8").with_relationship("contacted_ips"),
    ];
    Tables { nodes, edges }
}
