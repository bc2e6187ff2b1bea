//! Typed client for the analyzer backend's DAG endpoints.

use crate::client::http::HttpClient;
use crate::domain::{AnalyzerState, DagError, TransactionDagResponse};

// ============================================================================
// Endpoint paths
// ============================================================================

const TRANSACTION_DAG_PATH: &str = "/data/evm/transaction-dag";
const ANALYZER_STATE_PATH: &str = "/data/evm/parallel-analyzer-state";

// ============================================================================
// DagClient
// ============================================================================

/// Client for retrieving transaction DAGs and analyzer progress.
#[derive(Debug, Clone)]
pub struct DagClient {
    http: HttpClient,
    base_url: String,
}

impl DagClient {
    /// Create a client for the given API base URL.
    ///
    /// A trailing slash on the base URL is tolerated and stripped.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: HttpClient::new(),
            base_url,
        }
    }

    /// The configured API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the transaction DAG for a block.
    ///
    /// With `block_number` absent the server resolves its current head
    /// block. A response without a `transactions` field is rejected here as
    /// a fatal format error; a missing `dags` field passes through as
    /// "no edges".
    ///
    /// # Errors
    ///
    /// Returns [`DagError`] on network failure, non-2xx status, JSON parse
    /// failure, or an absent `transactions` field.
    pub async fn get_transaction_dag(
        &self,
        block_number: Option<i64>,
    ) -> Result<TransactionDagResponse, DagError> {
        let url = format!("{}{}", self.base_url, TRANSACTION_DAG_PATH);
        let mut request = self.http.get(&url);
        if let Some(number) = block_number {
            request = request.query(&[("block_number", number)]);
        }

        let response = request
            .send()
            .await
            .inspect_err(|e| tracing::debug!("Transaction DAG request failed: {e}"))?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::debug!("Transaction DAG returned status {status}: {message}");
            return Err(DagError::status(status.as_u16(), message));
        }

        let dag: TransactionDagResponse = response
            .json()
            .await
            .map_err(|e| DagError::parse(e.to_string()))?;
        if dag.transactions.is_none() {
            return Err(DagError::missing_field("transactions"));
        }
        Ok(dag)
    }

    /// Fetch the analyzer's progress state.
    ///
    /// # Errors
    ///
    /// Returns [`DagError`] on network failure, non-2xx status, or JSON
    /// parse failure.
    pub async fn get_analyzer_state(&self) -> Result<AnalyzerState, DagError> {
        let url = format!("{}{}", self.base_url, ANALYZER_STATE_PATH);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .inspect_err(|e| tracing::debug!("Analyzer state request failed: {e}"))?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DagError::status(status.as_u16(), message));
        }

        response
            .json()
            .await
            .map_err(|e| DagError::parse(e.to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================
