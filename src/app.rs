//! Application state and action dispatch.
//!
//! `App` is the hosting view of the graph session: it issues DAG retrievals
//! keyed by block number, keeps the loading indicator and status line, and
//! owns the [`GraphSession`] that renders the latest snapshot. Retrievals
//! are tagged with a request sequence number; only the latest request's
//! result is ever applied (last-requested-wins), so rapid block changes and
//! out-of-order completions cannot downgrade the view to stale data.

use color_eyre::Result;

use crate::{
    constants::{BLOCK_INPUT_MAX_LEN, FOOTER_HEIGHT, HEADER_HEIGHT},
    domain::{AnalyzerState, TransactionDagResponse},
    event::Action,
    network::NetworkManager,
    widgets::graph::{GraphSession, GraphSnapshot, SnapshotOutcome, TuiEngineFactory, Viewport},
};

// ============================================================================
// PopupState
// ============================================================================

/// Modal state layered over the main view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupState {
    None,
    /// Block-number entry, holding the digits typed so far.
    BlockInput(String),
    /// Transient message shown until dismissed.
    Message(String),
}

// ============================================================================
// App
// ============================================================================

/// Top-level application state.
pub struct App {
    pub exit: bool,
    /// Requested block; `None` means "the server's head block".
    pub block_number: Option<i64>,
    /// Whether a DAG retrieval is pending.
    pub loading: bool,
    /// Last error line, shown in the footer.
    pub status: Option<String>,
    pub analyzer_state: Option<AnalyzerState>,
    pub popup_state: PopupState,
    pub session: GraphSession<TuiEngineFactory>,
    request_seq: u64,
}

impl App {
    /// Create the initial application state with an unbound session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            exit: false,
            block_number: None,
            loading: false,
            status: None,
            analyzer_state: None,
            popup_state: PopupState::None,
            session: GraphSession::new(TuiEngineFactory),
            request_seq: 0,
        }
    }

    /// Dispatch an action against the current state.
    pub fn update(&mut self, action: Action, network: &NetworkManager) -> Result<()> {
        match action {
            Action::Quit => {
                self.session.unmount();
                self.exit = true;
            }
            Action::RefreshData => self.request_block(self.block_number, network),
            Action::NextBlock => {
                let next = self.block_number.map(|b| self.clamp_block(b + 1));
                self.request_block(next, network);
            }
            Action::PrevBlock => {
                let prev = self.block_number.map(|b| self.clamp_block(b - 1));
                self.request_block(prev, network);
            }
            Action::JumpToLatest => {
                let latest = self.analyzer_state.map(|s| s.latest_analyzed_block);
                self.request_block(latest, network);
            }
            Action::OpenBlockInput => {
                self.popup_state = PopupState::BlockInput(String::new());
            }
            Action::BlockInputChar(c) => {
                if let PopupState::BlockInput(input) = &mut self.popup_state {
                    if input.len() < BLOCK_INPUT_MAX_LEN {
                        input.push(c);
                    }
                }
            }
            Action::BlockInputBackspace => {
                if let PopupState::BlockInput(input) = &mut self.popup_state {
                    input.pop();
                }
            }
            Action::SubmitBlockInput => {
                if let PopupState::BlockInput(input) = &self.popup_state {
                    let parsed = input.parse::<i64>().ok();
                    self.popup_state = PopupState::None;
                    if let Some(number) = parsed {
                        self.request_block(Some(number), network);
                    }
                }
            }
            Action::ClearPopup => self.popup_state = PopupState::None,
            Action::ShowMessage(message) => {
                self.popup_state = PopupState::Message(message);
            }
            Action::UpdateDag { request_id, result } => self.apply_dag(request_id, result),
            Action::UpdateAnalyzerState(result) => match result {
                Ok(state) => self.analyzer_state = Some(state),
                Err(message) => {
                    self.status = Some(format!("Analyzer state unavailable: {message}"));
                }
            },
        }
        Ok(())
    }

    /// Issue a DAG retrieval for `block` and remember it as the latest
    /// request.
    pub fn request_block(&mut self, block: Option<i64>, network: &NetworkManager) {
        self.block_number = block;
        let request_id = self.begin_request();
        network.fetch_transaction_dag(block, request_id);
    }

    /// Start a new request generation: bump the sequence and raise the
    /// loading indicator. Returns the id that tags the request's result.
    pub fn begin_request(&mut self) -> u64 {
        self.request_seq += 1;
        self.loading = true;
        self.request_seq
    }

    /// Apply a finished DAG retrieval.
    ///
    /// Results that are not from the latest request are discarded without
    /// clearing the loading indicator: the newer request is still pending.
    pub fn apply_dag(
        &mut self,
        request_id: u64,
        result: Result<TransactionDagResponse, String>,
    ) {
        if request_id != self.request_seq {
            return;
        }
        self.loading = false;

        match result {
            Ok(response) => {
                if response.block_number.is_some() {
                    self.block_number = response.block_number;
                }
                let snapshot = GraphSnapshot::from_records(
                    response.transactions.as_deref().unwrap_or_default(),
                    response.dags.as_deref(),
                );
                match self.session.on_snapshot_change(&snapshot) {
                    Ok(SnapshotOutcome::Applied) => self.status = None,
                    Ok(SnapshotOutcome::Discarded) => {}
                    Err(err) => {
                        // The failed snapshot leaves no graph behind until
                        // the next successful one.
                        self.status = Some(format!("Graph construction failed: {err}"));
                    }
                }
            }
            Err(message) => {
                self.status = Some(format!("Failed to load transaction DAG: {message}"));
                let _ = self.session.on_snapshot_change(&GraphSnapshot::default());
            }
        }
    }

    /// React to a terminal resize: mount the session on first sight of the
    /// viewport, refresh it afterwards.
    pub fn update_terminal_size(&mut self, width: u16, height: u16) {
        let viewport = Viewport::new(
            width,
            height.saturating_sub(HEADER_HEIGHT + FOOTER_HEIGHT),
        );
        if self.session.is_mounted() {
            self.session.on_container_resize(viewport);
        } else {
            self.session.mount(viewport);
        }
    }

    fn clamp_block(&self, block: i64) -> i64 {
        let block = block.max(0);
        match self.analyzer_state {
            Some(state) => block.clamp(state.start_block, state.latest_analyzed_block),
            None => block,
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
