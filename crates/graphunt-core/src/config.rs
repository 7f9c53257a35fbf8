//! Analysis configuration.
//!
//! Every field carries a serde default, so an empty or partial
//! `graphunt.toml` is valid:
//!
//! ```toml
//! [limits]
//! max_nodes = 5000
//! max_edges = 50000
//!
//! [layout]
//! iterations = 50
//! seed = 42
//! threshold = 1e-4
//! scale = 1.0
//!
//! [report]
//! top_n = 10
//! heatmap_rows = 30
//! ```
//!
//! The composite-score weights are deliberately absent: they are a fixed
//! policy of the scorer.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AnalysisError;

/// File name looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "graphunt.toml";

/// Upper bound on layout iterations accepted from configuration.
pub const MAX_LAYOUT_ITERATIONS: usize = 10_000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

impl AnalysisConfig {
    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        self.limits.validate()?;
        self.layout.validate()
    }
}

/// Maximum batch size. Betweenness is `O(V * E)` and layout is `O(V^2)` per
/// iteration, so batches beyond these bounds are rejected up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_max_nodes")]
    pub max_nodes: usize,
    #[serde(default = "default_max_edges")]
    pub max_edges: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_nodes: default_max_nodes(),
            max_edges: default_max_edges(),
        }
    }
}

impl LimitsConfig {
    fn validate(&self) -> Result<(), AnalysisError> {
        if self.max_nodes == 0 {
            return Err(invalid("limits.max_nodes", "must be at least 1"));
        }
        Ok(())
    }
}

/// Force-directed layout parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Fixed iteration budget.
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Seed for the initial random placement.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Stop early once the mean per-node displacement drops below this.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Largest absolute coordinate after rescaling.
    #[serde(default = "default_scale")]
    pub scale: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            seed: default_seed(),
            threshold: default_threshold(),
            scale: default_scale(),
        }
    }
}

impl LayoutConfig {
    /// Same parameters with a different seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidConfig`] for a zero or oversized
    /// iteration budget, a negative or non-finite threshold, or a
    /// non-positive scale.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.iterations == 0 {
            return Err(invalid("layout.iterations", "must be at least 1"));
        }
        if self.iterations > MAX_LAYOUT_ITERATIONS {
            return Err(invalid(
                "layout.iterations",
                format!("must not exceed {MAX_LAYOUT_ITERATIONS}"),
            ));
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(invalid("layout.threshold", "must be a finite value >= 0"));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(invalid("layout.scale", "must be a finite value > 0"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Rows shown in the top-candidates table.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Rows included in the heatmap matrix.
    #[serde(default = "default_heatmap_rows")]
    pub heatmap_rows: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            heatmap_rows: default_heatmap_rows(),
        }
    }
}

const fn default_max_nodes() -> usize {
    5_000
}

const fn default_max_edges() -> usize {
    50_000
}

const fn default_iterations() -> usize {
    50
}

const fn default_seed() -> u64 {
    42
}

const fn default_threshold() -> f64 {
    1e-4
}

const fn default_scale() -> f64 {
    1.0
}

const fn default_top_n() -> usize {
    10
}

const fn default_heatmap_rows() -> usize {
    30
}

fn invalid(field: &'static str, reason: impl Into<String>) -> AnalysisError {
    AnalysisError::InvalidConfig {
        field,
        reason: reason.into(),
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Parse and validate a config file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid TOML, or holds
/// out-of-range values.
pub fn load_config_file(path: &Path) -> Result<AnalysisConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config = toml::from_str::<AnalysisConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("Invalid values in {}", path.display()))?;

    Ok(config)
}

/// Resolve the effective configuration.
///
/// Precedence (highest wins):
/// 1. `explicit` path (must exist)
/// 2. `graphunt.toml` in `project_root`
/// 3. `graphunt/config.toml` in the user config directory
/// 4. Built-in defaults
///
/// # Errors
///
/// Returns an error if the chosen file cannot be loaded.
pub fn resolve_config(explicit: Option<&Path>, project_root: &Path) -> Result<AnalysisConfig> {
    let user_path = dirs::config_dir().map(|dir| dir.join("graphunt/config.toml"));
    resolve_config_with(explicit, project_root, user_path)
}

fn resolve_config_with(
    explicit: Option<&Path>,
    project_root: &Path,
    user_path: Option<PathBuf>,
) -> Result<AnalysisConfig> {
    if let Some(path) = explicit {
        debug!(path = %path.display(), "loading explicit config");
        return load_config_file(path);
    }

    let project_path = project_root.join(PROJECT_CONFIG_FILE);
    if project_path.exists() {
        debug!(path = %project_path.display(), "loading project config");
        return load_config_file(&project_path);
    }

    if let Some(path) = user_path.filter(|p| p.exists()) {
        debug!(path = %path.display(), "loading user config");
        return load_config_file(&path);
    }

    Ok(AnalysisConfig::default())
}
