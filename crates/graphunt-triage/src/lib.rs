#![forbid(unsafe_code)]
//! graphunt-triage library.
//!
//! Scoring and layout engine for indicator relationship graphs: graph
//! construction, centrality metrics, the composite C2 score, and a seeded
//! force-directed layout.
//!
//! # Conventions
//!
//! - **Errors**: Pipeline errors are [`graphunt_core::AnalysisError`].
//!   Malformed input is tolerated, never an error.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod graph;
pub mod layout;
pub mod metrics;
pub mod pipeline;
pub mod score;

pub use pipeline::{Analysis, analyze, check_limits};
