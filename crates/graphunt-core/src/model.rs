//! Input records and indicator categories.
//!
//! Collectors hand the engine two flat tables: node records (`id`, optional
//! `type`, plus any extra attributes) and edge records (`src`, `dst`,
//! optional `relationship`). Records are deserialized leniently so that a
//! noisy upstream table never aborts a batch; whether a record is usable is
//! decided by the graph builder via [`NodeRecord::accepted_id`] and
//! [`EdgeRecord::endpoints`].
//!
//! An identifier is "empty" only when it is missing or the empty string.
//! Values such as `"0"`, `"false"` or `" "` are valid identifiers.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Indicator category.
///
/// The four known categories map to a dedicated marker symbol. Any other
/// non-empty label is carried through verbatim as [`Category::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Ip,
    Domain,
    Url,
    Hash,
    #[default]
    Unknown,
    Other(String),
}

impl Category {
    /// Parse a category label. Only the exact lowercase labels map to the
    /// known categories; anything else is kept verbatim. An empty label is
    /// [`Category::Unknown`].
    #[must_use]
    pub fn parse(label: &str) -> Self {
        match label {
            "ip" => Self::Ip,
            "domain" => Self::Domain,
            "url" => Self::Url,
            "hash" => Self::Hash,
            "" | "unknown" => Self::Unknown,
            _ => Self::Other(label.to_string()),
        }
    }

    /// Label used in score tables and JSON output.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ip => "ip",
            Self::Domain => "domain",
            Self::Url => "url",
            Self::Hash => "hash",
            Self::Unknown => "unknown",
            Self::Other(label) => label,
        }
    }

    /// Marker symbol used by rendering collaborators.
    ///
    /// Verbatim labels that differ from a known label only by case (`"IP"`,
    /// `"Hash"`) get that label's marker.
    #[must_use]
    pub fn symbol(&self) -> MarkerSymbol {
        match self {
            Self::Ip => MarkerSymbol::Diamond,
            Self::Domain => MarkerSymbol::Circle,
            Self::Url => MarkerSymbol::TriangleUp,
            Self::Hash => MarkerSymbol::Square,
            Self::Unknown => MarkerSymbol::Cross,
            Self::Other(label) => match Self::parse(&label.to_ascii_lowercase()) {
                Self::Other(_) => MarkerSymbol::Cross,
                known => known.symbol(),
            },
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Self::parse(&label)
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Self::parse(label)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

// ---------------------------------------------------------------------------
// MarkerSymbol
// ---------------------------------------------------------------------------

/// Marker shape for a node in the network view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerSymbol {
    Diamond,
    Circle,
    TriangleUp,
    Square,
    #[serde(rename = "x")]
    Cross,
}

impl MarkerSymbol {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Diamond => "diamond",
            Self::Circle => "circle",
            Self::TriangleUp => "triangle-up",
            Self::Square => "square",
            Self::Cross => "x",
        }
    }
}

impl fmt::Display for MarkerSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One row of the node table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    /// Category label (`ip`, `domain`, `url`, `hash`, or anything else).
    #[serde(default, rename = "type", deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    /// Any other columns, kept verbatim.
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

impl NodeRecord {
    #[must_use]
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            kind: Some(kind.into()),
            attributes: BTreeMap::new(),
        }
    }

    /// A record with an id and no category.
    #[must_use]
    pub fn untyped(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            kind: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Attach an extra attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// The identifier, if present and non-empty.
    #[must_use]
    pub fn accepted_id(&self) -> Option<&str> {
        non_empty(self.id.as_deref())
    }

    /// Parsed category; missing or empty `type` is [`Category::Unknown`].
    #[must_use]
    pub fn category(&self) -> Category {
        self.kind.as_deref().map_or(Category::Unknown, Category::parse)
    }
}

/// One row of the edge table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EdgeRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub src: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub dst: Option<String>,
    /// Informational only; not retained in the structural graph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
}

impl EdgeRecord {
    #[must_use]
    pub fn new(src: impl Into<String>, dst: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
            dst: Some(dst.into()),
            relationship: None,
        }
    }

    #[must_use]
    pub fn with_relationship(mut self, relationship: impl Into<String>) -> Self {
        self.relationship = Some(relationship.into());
        self
    }

    /// Both endpoints, if both are present and non-empty.
    #[must_use]
    pub fn endpoints(&self) -> Option<(&str, &str)> {
        Some((
            non_empty(self.src.as_deref())?,
            non_empty(self.dst.as_deref())?,
        ))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Accept strings, numbers, and booleans as identifiers; `null` is absent.
///
/// Upstream tables occasionally carry numeric identifiers. Rejecting them
/// would fail the whole batch, so they are stringified instead.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other @ (Value::Array(_) | Value::Object(_))) => Some(other.to_string()),
    })
}
