//! Wire-level records for the transaction DAG endpoints.
//!
//! The analyzer backend returns transactions and dependency edges as loosely
//! structured JSON: besides the fields the layout cares about (`index`,
//! `source`, `target`), records carry arbitrary upstream payload
//! (`tx_hash`, `gas_used`, `dep_type`, ...). That payload is preserved
//! verbatim through `#[serde(flatten)]` so derived graph entities can
//! reproduce it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// TransactionRecord
// ============================================================================

/// A single transaction within a block, as returned by the backend.
///
/// `index` is the transaction's position within its block and must be unique
/// there; duplicate indices are undefined input and surface later as a
/// duplicate-node construction error. All other upstream fields are kept in
/// `extra` without interpretation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Position of the transaction within its block. Unique per block.
    pub index: i64,
    /// Remaining upstream payload, preserved as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TransactionRecord {
    /// Create a record carrying only an index (mostly for tests).
    #[must_use]
    pub fn bare(index: i64) -> Self {
        Self {
            index,
            extra: Map::new(),
        }
    }
}

// ============================================================================
// DependencyEdge
// ============================================================================

/// A directed dependency between two transactions of the same block.
///
/// `source` and `target` reference [`TransactionRecord::index`] values.
/// Multiple edges between the same pair are permitted; no deduplication
/// happens anywhere in the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyEdge {
    /// Index of the transaction this edge starts from.
    pub source: i64,
    /// Index of the transaction this edge points to.
    pub target: i64,
    /// Remaining upstream payload (e.g. `dep_type`), preserved as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DependencyEdge {
    /// Create an edge carrying only its endpoints (mostly for tests).
    #[must_use]
    pub fn bare(source: i64, target: i64) -> Self {
        Self {
            source,
            target,
            extra: Map::new(),
        }
    }
}

// ============================================================================
// TransactionDagResponse
// ============================================================================

/// Response of `GET /data/evm/transaction-dag`.
///
/// All fields are optional at the wire level. A missing `transactions` field
/// is a fatal format error that the client rejects before the response
/// reaches the layout; a missing `dags` field simply means "no edges".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionDagResponse {
    /// Block the DAG was computed for (echoed by the server).
    #[serde(default)]
    pub block_number: Option<i64>,
    /// Transactions of the block, in analysis order.
    #[serde(default)]
    pub transactions: Option<Vec<TransactionRecord>>,
    /// Pairwise dependency edges between the transactions.
    #[serde(default)]
    pub dags: Option<Vec<DependencyEdge>>,
}

// ============================================================================
// AnalyzerState
// ============================================================================

/// Response of `GET /data/evm/parallel-analyzer-state`.
///
/// Describes how far the backend's analyzer has progressed; used for the
/// header display and to clamp block navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerState {
    /// Chain head as last seen by the analyzer.
    pub latest_block: i64,
    /// Chain the analyzer is bound to.
    pub chain_id: i64,
    /// First block the analyzer covers.
    pub start_block: i64,
    /// Newest block with a complete dependency analysis.
    pub latest_analyzed_block: i64,
}

// ============================================================================
// Tests
// ============================================================================
