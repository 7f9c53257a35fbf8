#![forbid(unsafe_code)]
//! graphunt-core library.
//!
//! Shared data model for the indicator relationship graph: node and edge
//! records as supplied by collectors, indicator categories, error codes, and
//! the analysis configuration.
//!
//! # Conventions
//!
//! - **Errors**: Library errors are [`error::AnalysisError`]; application
//!   code uses `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod model;

pub use config::AnalysisConfig;
pub use error::{AnalysisError, ErrorCode};
pub use model::{Category, EdgeRecord, MarkerSymbol, NodeRecord};
