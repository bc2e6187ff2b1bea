//! Layout builder: transaction and edge records to a positioned graph.
//!
//! This module turns the raw analyzer response into a [`GraphSnapshot`]
//! ready for force-free rendering. Placement follows a rectangular spiral
//! (boustrophedon) pattern: instantaneous to compute, stable across
//! re-renders of the same input ordering, and deliberately independent of
//! the dependency topology.

use serde_json::{Map, Value};

use crate::domain::{DependencyEdge, TransactionRecord};

// ============================================================================
// Constants
// ============================================================================

/// Radius unit of the spiral: distance between adjacent placement bands.
pub const LAYOUT_RADIUS: f64 = 5.0;

/// Fixed visual size of every node.
pub const NODE_SIZE: f64 = 10.0;

// ============================================================================
// PositionedNode
// ============================================================================

/// A layout-positioned graph node derived from one [`TransactionRecord`].
///
/// Created fresh on every layout recompute and never mutated in place; a new
/// snapshot fully supersedes the previous one. Upstream payload is
/// reproduced in `extra`, then `id`, `label`, `size`, `x` and `y` win
/// unconditionally (colliding upstream keys are dropped).
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedNode {
    /// Stringified transaction `index`; unique per snapshot by contract.
    pub id: String,
    /// Display label (same as `id`).
    pub label: String,
    /// Fixed visual size.
    pub size: f64,
    /// Layout-computed x coordinate.
    pub x: f64,
    /// Layout-computed y coordinate.
    pub y: f64,
    /// Upstream payload carried through for detail display.
    pub extra: Map<String, Value>,
}

// ============================================================================
// TypedEdge
// ============================================================================

/// Rendering style tag for an edge. Every dependency edge renders as an
/// arrow; the enum exists so the engine seam stays style-agnostic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EdgeKind {
    /// Directed arrow from source to target.
    #[default]
    Arrow,
}

impl EdgeKind {
    /// Wire/style name of this edge kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Arrow => "arrow",
        }
    }
}

/// A typed graph edge derived from one [`DependencyEdge`].
///
/// The id is synthesized from the edge's position in the input sequence
/// (`e0`, `e1`, ...), not from its content: two snapshots built from
/// differently-ordered but content-identical edge lists get different ids.
/// Nothing downstream keys on edge ids across snapshots, so this stays the
/// cheap option.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedEdge {
    /// Position-indexed id, unique and strictly increasing per snapshot.
    pub id: String,
    /// Node id this edge starts from.
    pub source: String,
    /// Node id this edge points to.
    pub target: String,
    /// Fixed rendering style.
    pub kind: EdgeKind,
    /// Upstream payload (e.g. `dep_type`) carried through.
    pub extra: Map<String, Value>,
}

// ============================================================================
// GraphSnapshot
// ============================================================================

/// The sole handoff structure between the layout builder and the render
/// session: a positioned node set plus a typed edge set.
///
/// Treated as immutable once produced. A new snapshot fully replaces the
/// previous one; there is no incremental diffing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphSnapshot {
    /// Positioned nodes, in traversal order.
    pub nodes: Vec<PositionedNode>,
    /// Typed edges, in input order.
    pub edges: Vec<TypedEdge>,
}

impl GraphSnapshot {
    /// Build a snapshot from raw analyzer records.
    ///
    /// Transactions are traversed in array order (the layout index sequence,
    /// distinct from the `index` field's value). An empty transaction slice
    /// yields an empty node set and an absent edge list an empty edge set;
    /// neither is an error.
    ///
    /// # Arguments
    ///
    /// * `transactions` - Transactions in traversal order
    /// * `dags` - Dependency edges, if the response carried any
    ///
    /// # Returns
    ///
    /// A new `GraphSnapshot` with every node positioned on the spiral.
    #[must_use]
    pub fn from_records(
        transactions: &[TransactionRecord],
        dags: Option<&[DependencyEdge]>,
    ) -> Self {
        let mut nodes = Vec::with_capacity(transactions.len());
        let mut prev_x = 0.0;
        for (i, txn) in transactions.iter().enumerate() {
            let (x, y) = spiral_position(i, prev_x);
            prev_x = x;
            nodes.push(build_node(txn, x, y));
        }

        let edges = dags
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(i, dep)| build_edge(dep, i))
            .collect();

        Self { nodes, edges }
    }

    /// Whether the snapshot contains no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// ============================================================================
// Placement
// ============================================================================

/// Compute the spiral coordinates for traversal index `i`.
///
/// The first node sits at the origin. For `i > 0` the x coordinate steps
/// outward one band every four nodes, alternating sign in pairs, and the y
/// coordinate is the negation of the previous node's x. Only `prev_x` is
/// carried between iterations, which keeps the pass restartable.
fn spiral_position(i: usize, prev_x: f64) -> (f64, f64) {
    if i == 0 {
        return (0.0, 0.0);
    }
    let band = i.div_ceil(4) as f64;
    let sign = if (i - 1) % 4 <= 1 { 1.0 } else { -1.0 };
    let x = band * sign * LAYOUT_RADIUS;
    // 0.0 - prev_x rather than -prev_x keeps the origin's y at +0.0.
    let y = 0.0 - prev_x;
    (x, y)
}

fn build_node(txn: &TransactionRecord, x: f64, y: f64) -> PositionedNode {
    let id = txn.index.to_string();
    let mut extra = txn.extra.clone();
    extra.insert("index".to_string(), Value::from(txn.index));
    // Typed fields win over upstream keys of the same name.
    for key in ["id", "label", "size", "x", "y"] {
        extra.remove(key);
    }
    PositionedNode {
        label: id.clone(),
        id,
        size: NODE_SIZE,
        x,
        y,
        extra,
    }
}

fn build_edge(dep: &DependencyEdge, position: usize) -> TypedEdge {
    let mut extra = dep.extra.clone();
    for key in ["id", "type", "source", "target"] {
        extra.remove(key);
    }
    TypedEdge {
        id: format!("e{position}"),
        source: dep.source.to_string(),
        target: dep.target.to_string(),
        kind: EdgeKind::Arrow,
        extra,
    }
}

// ============================================================================
// Tests
// ============================================================================
