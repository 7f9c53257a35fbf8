//! Fruchterman-Reingold force-directed layout.
//!
//! # Algorithm
//!
//! 1. Place every node uniformly at random in the unit square, drawing from
//!    a seeded [`StdRng`] in ascending id order.
//! 2. For a fixed number of iterations, compute for each node the sum of
//!    - repulsion `k² / d` away from every other node, and
//!    - attraction `d² / k` toward each neighbor,
//!
//!    where `k = 1 / sqrt(n)` is the ideal edge length and `d` is the
//!    pairwise distance, clamped at 0.01 so coincident nodes stay finite.
//! 3. Move each node along its net force by at most the current
//!    temperature. The temperature starts at 10% of the initial extent and
//!    cools linearly to zero.
//! 4. Stop early when the mean displacement falls below `threshold`.
//! 5. Recenter at the origin and rescale so the largest absolute coordinate
//!    equals `scale`.
//!
//! Complexity: O(iterations * n²). Iterations are capped at
//! [`MAX_LAYOUT_ITERATIONS`], so runtime is bounded for a given graph size.
//!
//! # Determinism
//!
//! The simulation runs over nodes sorted by id, the same order the topology
//! hash uses, with no parallelism and no hash-ordered iteration. The order in
//! which records arrived has no effect: the same topology and seed give
//! bitwise identical coordinates.

use std::collections::BTreeMap;

use graphunt_core::config::{LayoutConfig, MAX_LAYOUT_ITERATIONS};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use crate::graph::build::IndicatorGraph;
use crate::layout::{Layout, Point};

/// Minimum pairwise distance used in force terms.
const MIN_DISTANCE: f64 = 0.01;

/// Initial temperature as a fraction of the initial layout extent.
const INITIAL_TEMPERATURE_FRACTION: f64 = 0.1;

/// Compute a 2D force-directed layout.
///
/// An empty graph yields an empty layout; a single node sits at the origin.
#[must_use]
#[instrument(skip(g, config), fields(nodes = g.node_count(), edges = g.edge_count(), seed = config.seed))]
pub fn spring_layout(g: &IndicatorGraph, config: &LayoutConfig) -> Layout {
    let n = g.node_count();
    let mut positions = BTreeMap::new();

    if n == 1 {
        if let Some(only) = g.indicators().next() {
            positions.insert(only.id.clone(), Point::ORIGIN);
        }
    } else if n > 1 {
        let (ids, adjacency) = sorted_by_id(g);
        let coords = fruchterman_reingold(&adjacency, config);
        for (id, point) in ids.into_iter().zip(coords) {
            positions.insert(id.to_string(), point);
        }
    }

    Layout {
        positions,
        seed: config.seed,
        content_hash: g.content_hash.clone(),
    }
}

/// Ids in ascending order and the adjacency relabelled to match.
fn sorted_by_id(g: &IndicatorGraph) -> (Vec<&str>, Vec<Vec<usize>>) {
    let ids: Vec<&str> = g.indicators().map(|i| i.id.as_str()).collect();
    let mut order: Vec<usize> = (0..ids.len()).collect();
    order.sort_unstable_by_key(|&i| ids[i]);

    let mut rank = vec![0; ids.len()];
    for (r, &i) in order.iter().enumerate() {
        rank[i] = r;
    }

    let adjacency = g.adjacency();
    let relabelled = order
        .iter()
        .map(|&i| {
            let mut neighbors: Vec<usize> = adjacency[i].iter().map(|&j| rank[j]).collect();
            neighbors.sort_unstable();
            neighbors
        })
        .collect();

    (order.iter().map(|&i| ids[i]).collect(), relabelled)
}

#[allow(clippy::cast_precision_loss)]
fn fruchterman_reingold(adjacency: &[Vec<usize>], config: &LayoutConfig) -> Vec<Point> {
    let n = adjacency.len();
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut pos: Vec<Point> = (0..n)
        .map(|_| {
            let x = rng.gen_range(0.0..1.0);
            let y = rng.gen_range(0.0..1.0);
            Point { x, y }
        })
        .collect();

    let k = (1.0 / n as f64).sqrt();
    let iterations = config.iterations.clamp(1, MAX_LAYOUT_ITERATIONS);
    let mut temperature = extent(&pos) * INITIAL_TEMPERATURE_FRACTION;
    let cooling = temperature / (iterations as f64 + 1.0);

    let mut displacement = vec![Point::ORIGIN; n];
    let mut ran = 0;

    for _ in 0..iterations {
        ran += 1;

        for (i, disp) in displacement.iter_mut().enumerate() {
            let mut fx = 0.0;
            let mut fy = 0.0;
            let neighbors = &adjacency[i];

            for j in 0..n {
                if i == j {
                    continue;
                }
                let dx = pos[i].x - pos[j].x;
                let dy = pos[i].y - pos[j].y;
                let dist = dx.hypot(dy).max(MIN_DISTANCE);

                let mut force = (k * k) / (dist * dist);
                if neighbors.binary_search(&j).is_ok() {
                    force -= dist / k;
                }
                fx += dx * force;
                fy += dy * force;
            }

            *disp = Point { x: fx, y: fy };
        }

        let mut moved_sq: f64 = 0.0;
        for (p, disp) in pos.iter_mut().zip(&displacement) {
            let mut length = disp.x.hypot(disp.y);
            if length < MIN_DISTANCE {
                length = 0.1;
            }
            let step_x = disp.x * temperature / length;
            let step_y = disp.y * temperature / length;
            p.x += step_x;
            p.y += step_y;
            moved_sq += step_x * step_x + step_y * step_y;
        }

        temperature -= cooling;

        if moved_sq.sqrt() / (n as f64) < config.threshold {
            break;
        }
    }

    debug!(iterations = ran, "spring layout converged");

    rescale(&mut pos, config.scale);
    pos
}

/// Largest side of the bounding box.
fn extent(pos: &[Point]) -> f64 {
    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for p in pos {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    (max_x - min_x).max(max_y - min_y)
}

/// Center on the mean and scale so that `max(|coord|) == scale`.
#[allow(clippy::cast_precision_loss)]
fn rescale(pos: &mut [Point], scale: f64) {
    if pos.is_empty() {
        return;
    }
    let n = pos.len() as f64;
    let mean_x = pos.iter().map(|p| p.x).sum::<f64>() / n;
    let mean_y = pos.iter().map(|p| p.y).sum::<f64>() / n;

    let mut lim: f64 = 0.0;
    for p in pos.iter_mut() {
        p.x -= mean_x;
        p.y -= mean_y;
        lim = lim.max(p.x.abs()).max(p.y.abs());
    }

    if lim > 0.0 {
        let factor = scale / lim;
        for p in pos.iter_mut() {
            p.x *= factor;
            p.y *= factor;
        }
    }
}
