//! DAG visualization widgets.
//!
//! This module contains the core of the application: turning analyzer
//! transaction/edge records into a positioned graph and keeping exactly one
//! live rendering engine in sync with the latest data and viewport size.
//!
//! # Module Structure
//!
//! - [`layout`]: pure layout builder ([`GraphSnapshot`] construction)
//! - [`engine`]: rendering-engine seam ([`RenderEngine`], [`EngineFactory`])
//! - [`session`]: render session lifecycle state machine ([`GraphSession`])
//! - [`renderer`]: terminal engine and Ratatui widget
//!
//! # Example Usage
//!
//! ```ignore
//! use crate::widgets::graph::{DagGraphWidget, GraphSession, GraphSnapshot, TuiEngineFactory};
//!
//! let mut session = GraphSession::new(TuiEngineFactory);
//! session.mount(viewport);
//! let snapshot = GraphSnapshot::from_records(&transactions, dags.as_deref());
//! session.on_snapshot_change(&snapshot)?;
//! if let Some(engine) = session.engine() {
//!     frame.render_widget(DagGraphWidget::new(engine), area);
//! }
//! ```

pub mod engine;
pub mod layout;
pub mod renderer;
pub mod session;

#[cfg(test)]
mod tests;

// Re-export main types at module level
pub use engine::{EngineFactory, GraphConstructionError, RenderEngine, Viewport};
pub use layout::{GraphSnapshot, PositionedNode, TypedEdge};
pub use renderer::{DagGraphWidget, TuiEngine, TuiEngineFactory};
pub use session::{GraphSession, SnapshotOutcome};
