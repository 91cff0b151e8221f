use std::{any::Any, panic::AssertUnwindSafe, sync::Arc};

use futures::FutureExt;
use tokio::{sync::mpsc, task::JoinHandle, task::JoinSet};
use tokio_util::sync::CancellationToken;

use crate::{
    core::raw_msg::RawMsg, domain::search::SearchError,
    infrastructure::search_client::SearchBackend,
};

/// Operations accepted by the SearchService
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOperation {
    Search { seq: u64, query: String },
    CancelAll,
}

/// SearchService runs searches in the background and reports every outcome as a RawMsg
///
/// Each search runs in its own task, so overlapping submissions are allowed and
/// outcomes arrive in completion order. Ordering policy is up to the update loop.
pub struct SearchService {
    backend: Arc<dyn SearchBackend>,
    // Incoming channels
    op_rx: mpsc::UnboundedReceiver<SearchOperation>,
    cancel_token: CancellationToken,
    // Outgoing channels
    raw_tx: mpsc::UnboundedSender<RawMsg>,
    tasks: JoinSet<()>,
}

pub type NewSearchService = (
    mpsc::UnboundedSender<SearchOperation>, // op_tx - operations to run
    CancellationToken,                      // shutdown signal
    SearchService,
);

impl SearchService {
    pub fn new(
        backend: Arc<dyn SearchBackend>,
        raw_tx: mpsc::UnboundedSender<RawMsg>,
    ) -> NewSearchService {
        let (op_tx, op_rx) = mpsc::unbounded_channel();
        let cancel_token = CancellationToken::new();

        (
            op_tx,
            cancel_token.clone(),
            Self {
                backend,
                op_rx,
                cancel_token,
                raw_tx,
                tasks: JoinSet::new(),
            },
        )
    }

    /// Run the SearchService in background task
    pub fn run(mut self) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run_service().await;
        })
    }

    /// Main service loop
    async fn run_service(&mut self) {
        loop {
            tokio::select! {
                _ = self.cancel_token.cancelled() => {
                    log::info!("SearchService received cancellation signal");
                    break;
                }

                op = self.op_rx.recv() => match op {
                    Some(op) => self.handle_operation(op),
                    None => {
                        log::info!("SearchService: operation channel closed");
                        break;
                    }
                },

                Some(joined) = self.tasks.join_next(), if !self.tasks.is_empty() => {
                    // Backend panics are caught inside the task, so only cancellation lands here
                    if let Err(e) = joined {
                        if e.is_panic() {
                            log::error!("Search task panicked: {e}");
                            if self.raw_tx.send(RawMsg::Error(format!("Search task panicked: {e}"))).is_err() {
                                log::warn!("Dropped panic report; the runtime stopped listening");
                            }
                        }
                    }
                }
            }
        }

        log::info!("SearchService: aborting {} in-flight searches", self.tasks.len());
        self.tasks.shutdown().await;
    }

    fn handle_operation(&mut self, op: SearchOperation) {
        log::debug!("Handling SearchOperation: {op:?}");

        match op {
            SearchOperation::Search { seq, query } => {
                let backend = Arc::clone(&self.backend);
                let raw_tx = self.raw_tx.clone();
                self.tasks.spawn(async move {
                    // Every search reports back under its seq so the in-flight count settles
                    let outcome = AssertUnwindSafe(backend.search(&query))
                        .catch_unwind()
                        .await
                        .unwrap_or_else(|payload| {
                            let reason = panic_reason(payload.as_ref());
                            log::error!("Search #{seq} panicked in backend: {reason}");
                            Err(SearchError::Transport(format!("search panicked: {reason}")))
                        });
                    if let Err(e) = &outcome {
                        log::debug!("Search #{seq} failed in backend: {e}");
                    }
                    if raw_tx.send(RawMsg::SearchFinished { seq, outcome }).is_err() {
                        log::warn!("Search #{seq} finished after the runtime stopped listening");
                    }
                });
            }

            SearchOperation::CancelAll => {
                log::info!("Cancelling {} in-flight searches", self.tasks.len());
                self.tasks.abort_all();
            }
        }
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
