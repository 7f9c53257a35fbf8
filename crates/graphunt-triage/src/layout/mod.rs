//! 2D layout of the relationship graph for visualization.
//!
//! The layout engine only reads graph topology. It does not depend on the
//! centrality metrics or scores and can run concurrently with them.

pub mod spring;
pub mod style;

use std::collections::BTreeMap;

use serde::Serialize;

pub use spring::spring_layout;
pub use style::{NodeStyle, node_styles};

/// A 2D coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Coordinates per indicator id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    pub positions: BTreeMap<String, Point>,
    /// Seed the layout was computed with.
    pub seed: u64,
    /// Topology hash of the graph the layout was computed for.
    pub content_hash: String,
}

impl Layout {
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Point> {
        self.positions.get(id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
