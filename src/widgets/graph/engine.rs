//! Rendering-engine seam for the graph session.
//!
//! The session manager is engine-agnostic: any capability-providing engine
//! can be injected through [`EngineFactory`]. The shipped terminal engine
//! lives in [`super::renderer`]; tests inject recording mocks.

use thiserror::Error;

use super::layout::{PositionedNode, TypedEdge};

// ============================================================================
// Viewport
// ============================================================================

/// Physical dimensions of the container the graph renders into, in
/// terminal cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl Viewport {
    /// Create a viewport from explicit dimensions.
    #[must_use]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Fatal construction error for one snapshot.
///
/// Raised while populating a fresh engine; the session does not attempt
/// partial recovery or partial rendering, and the previous engine is not
/// resurrected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphConstructionError {
    /// Two nodes carried the same id (malformed snapshot, e.g. duplicate
    /// transaction indices).
    #[error("duplicate node id '{id}'")]
    DuplicateNode {
        /// The colliding node id.
        id: String,
    },

    /// An edge referenced a node id that was never inserted.
    #[error("edge '{edge_id}' references unknown node '{node_id}'")]
    DanglingEdge {
        /// Id of the offending edge.
        edge_id: String,
        /// The missing endpoint id.
        node_id: String,
    },
}

// ============================================================================
// Traits
// ============================================================================

/// A live rendering-engine instance over one internal graph structure.
///
/// Contract: all nodes must be inserted before any edge referencing them;
/// violating the order (or inserting a dangling edge at all) is an
/// insertion failure. `refresh` is presentation-only and must stay cheap —
/// the resize observer may fire at high frequency.
pub trait RenderEngine {
    /// Insert a node into the internal graph structure.
    ///
    /// # Errors
    ///
    /// Returns [`GraphConstructionError::DuplicateNode`] if a node with the
    /// same id already exists.
    fn insert_node(&mut self, node: &PositionedNode) -> Result<(), GraphConstructionError>;

    /// Insert an edge into the internal graph structure.
    ///
    /// # Errors
    ///
    /// Returns [`GraphConstructionError::DanglingEdge`] if either endpoint
    /// has not been inserted.
    fn insert_edge(&mut self, edge: &TypedEdge) -> Result<(), GraphConstructionError>;

    /// Adapt presentation to a new container size without touching the
    /// graph structure.
    fn refresh(&mut self, viewport: Viewport);

    /// Release all internal resources. Called exactly once, on every exit
    /// path, before the instance is dropped.
    fn kill(&mut self);
}

/// Factory producing fresh engine instances for the session manager.
///
/// One fresh engine is created per snapshot; engines are never reused
/// across snapshots.
pub trait EngineFactory {
    /// Engine type produced by this factory.
    type Engine: RenderEngine;

    /// Construct a new engine bound to the given viewport.
    fn create(&self, viewport: Viewport) -> Self::Engine;
}
