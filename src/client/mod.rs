//! HTTP clients for the parallel-execution analyzer API.
//!
//! This module provides typed clients for the analyzer backend:
//! - transaction DAG retrieval for a block
//! - analyzer progress state
//!
//! # Example
//!
//! ```ignore
//! use crate::client::DagClient;
//!
//! let client = DagClient::new("http://127.0.0.1:8080");
//! let dag = client.get_transaction_dag(Some(2952107)).await?;
//! ```

pub mod dag;
pub mod http;

// ============================================================================
// Re-exports
// ============================================================================

pub use dag::DagClient;
pub use http::{HttpClient, HttpConfig};
