use crate::domain::{AnalyzerState, TransactionDagResponse};

/// Events related to network operations and data fetching.
#[derive(Debug)]
pub enum NetworkUpdateEvent {
    /// A transaction-DAG retrieval finished. `request_id` identifies which
    /// request this result belongs to; the app discards results that are
    /// not from the latest request.
    DagFetched {
        request_id: u64,
        result: Result<TransactionDagResponse, String>,
    },
    /// An analyzer-state poll finished.
    AnalyzerStateFetched(Result<AnalyzerState, String>),
}

/// Application actions triggered by user input or network events.
#[derive(Debug)]
pub enum Action {
    Quit,
    RefreshData,
    NextBlock,
    PrevBlock,
    JumpToLatest,
    OpenBlockInput,
    BlockInputChar(char),
    BlockInputBackspace,
    SubmitBlockInput,
    ClearPopup,
    ShowMessage(String),

    UpdateDag {
        request_id: u64,
        result: Result<TransactionDagResponse, String>,
    },
    UpdateAnalyzerState(Result<AnalyzerState, String>),
}
