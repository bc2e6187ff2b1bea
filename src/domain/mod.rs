//! Domain types for the parallel-execution analyzer API.
//!
//! This module defines the wire-level records returned by the analyzer
//! backend (transactions, dependency edges, analyzer state) and the error
//! types used by the client layer.

pub mod dag;
pub mod error;

// ============================================================================
// Re-exports
// ============================================================================

pub use dag::{AnalyzerState, DependencyEdge, TransactionDagResponse, TransactionRecord};
pub use error::DagError;
