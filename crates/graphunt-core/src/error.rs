use std::fmt;

use thiserror::Error;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    InvalidConfig,
    InputParseError,
    GraphTooLarge,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::InvalidConfig => "E1002",
            Self::InputParseError => "E2001",
            Self::GraphTooLarge => "E3001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::InvalidConfig => "Invalid configuration value",
            Self::InputParseError => "Node or edge table could not be parsed",
            Self::GraphTooLarge => "Graph exceeds the supported size",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in graphunt.toml and retry."),
            Self::InvalidConfig => {
                Some("Check [limits] and [layout] values in graphunt.toml against the documented ranges.")
            }
            Self::InputParseError => {
                Some("Node and edge tables must be JSON arrays of objects.")
            }
            Self::GraphTooLarge => Some(
                "Narrow the upstream query, or raise [limits] max_nodes/max_edges if the runtime is acceptable.",
            ),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors surfaced by the analysis pipeline.
///
/// Malformed records and empty graphs are not errors; only conditions that
/// force the whole batch to be rejected end up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// The batch is larger than the configured limits. It is rejected as a
    /// whole: truncating it would change every normalized column.
    #[error(
        "graph too large: {nodes} nodes / {edges} edges exceeds limit of {max_nodes} nodes / {max_edges} edges"
    )]
    GraphTooLarge {
        nodes: usize,
        edges: usize,
        max_nodes: usize,
        max_edges: usize,
    },

    #[error("invalid configuration: {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

impl AnalysisError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::GraphTooLarge { .. } => ErrorCode::GraphTooLarge,
            Self::InvalidConfig { .. } => ErrorCode::InvalidConfig,
        }
    }
}
