use crate::client::DagClient;
use crate::constants::ANALYZER_STATE_INTERVAL;
use crate::event::NetworkUpdateEvent;
use tokio::sync::mpsc;
use tokio::time::sleep;

/// Manages background network tasks.
///
/// Every retrieval runs as a detached tokio task that reports back through
/// the event channel; the UI thread never blocks on the network. DAG fetches
/// carry the caller's `request_id` so the app can tell a fresh result from a
/// superseded one.
pub struct NetworkManager {
    client: DagClient,
    runtime: tokio::runtime::Handle,
    network_event_sender: mpsc::Sender<NetworkUpdateEvent>,
}

impl NetworkManager {
    /// Creates a new NetworkManager.
    pub fn new(
        client: DagClient,
        runtime: tokio::runtime::Handle,
        network_event_sender: mpsc::Sender<NetworkUpdateEvent>,
    ) -> Self {
        Self {
            client,
            runtime,
            network_event_sender,
        }
    }

    /// Fetches the transaction DAG for `block_number` (`None` means the
    /// server's head block) and reports the result tagged with `request_id`.
    pub fn fetch_transaction_dag(&self, block_number: Option<i64>, request_id: u64) {
        let client = self.client.clone();
        let sender = self.network_event_sender.clone();

        self.runtime.spawn(async move {
            let result = client
                .get_transaction_dag(block_number)
                .await
                .map_err(|e| format!("{e}"));
            let _ = sender
                .send(NetworkUpdateEvent::DagFetched { request_id, result })
                .await;
        });
    }

    /// Fetches the analyzer progress state once.
    pub fn fetch_analyzer_state(&self) {
        let client = self.client.clone();
        let sender = self.network_event_sender.clone();

        self.runtime.spawn(async move {
            let result = client.get_analyzer_state().await.map_err(|e| format!("{e}"));
            let _ = sender
                .send(NetworkUpdateEvent::AnalyzerStateFetched(result))
                .await;
        });
    }

    /// Starts the periodic analyzer-state poll.
    ///
    /// The loop ends when the receiving side of the event channel is gone.
    pub fn start_analyzer_poll(&self) {
        let client = self.client.clone();
        let sender = self.network_event_sender.clone();

        self.runtime.spawn(async move {
            loop {
                sleep(ANALYZER_STATE_INTERVAL).await;
                let result = client.get_analyzer_state().await.map_err(|e| format!("{e}"));
                if sender
                    .send(NetworkUpdateEvent::AnalyzerStateFetched(result))
                    .await
                    .is_err()
                {
                    break;
                }
            }
        });
    }
}
