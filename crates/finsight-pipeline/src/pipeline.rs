//! Periodic conversation-processing pipeline
//!
//! One long-lived background task drives the loop: read the transcript,
//! extract company mentions, fetch stock data for the first match, persist
//! the snapshot. Ticks are strictly serialized; the inter-tick wait is
//! measured from the completion of the previous tick, not wall-clock
//! cadence. Nothing below the tick boundary may take the scheduler down:
//! a failed tick is logged and the next one runs as scheduled.

use crate::config::PipelineConfig;
use crate::controller::MarketDataController;
use crate::error::Result;
use crate::extract::{CompanyExtractor, ExtractionResult};
use crate::store::FileStore;
use finsight_client::MarketDataApi;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Lifecycle of the periodic scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Stopped,
    Starting,
    Running,
    Stopping,
}

/// Owns the recurring conversation-processing task
///
/// `start` and `stop` are the whole public lifecycle; concurrent `start`
/// calls are rejected by the state guard, and both operations are no-ops
/// when the pipeline is already in the requested state.
pub struct ConversationPipeline<A> {
    worker: Arc<TickWorker<A>>,
    interval: Duration,
    state: PipelineState,
    task: Option<JoinHandle<()>>,
}

/// Everything one tick needs, shared with the background task
struct TickWorker<A> {
    controller: Arc<MarketDataController<A>>,
    extractor: CompanyExtractor,
    store: Arc<dyn FileStore>,
    conversation_path: PathBuf,
    snapshot_path: PathBuf,
    last_extraction: Mutex<Option<ExtractionResult>>,
}

impl<A: MarketDataApi + 'static> ConversationPipeline<A> {
    /// Create a stopped pipeline over the given controller and store
    pub fn new(
        config: &PipelineConfig,
        controller: Arc<MarketDataController<A>>,
        store: Arc<dyn FileStore>,
    ) -> Result<Self> {
        let extractor = CompanyExtractor::new(&config.vocabulary)?;

        Ok(Self {
            worker: Arc::new(TickWorker {
                controller,
                extractor,
                store,
                conversation_path: config.conversation_path(),
                snapshot_path: config.stock_snapshot_path(),
                last_extraction: Mutex::new(None),
            }),
            interval: config.tick_interval,
            state: PipelineState::Stopped,
            task: None,
        })
    }

    /// Current lifecycle state
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Whether the recurring task is active
    pub fn is_running(&self) -> bool {
        self.state == PipelineState::Running
    }

    /// Start the periodic processing
    ///
    /// Runs one tick immediately, then schedules the recurring task. A
    /// pipeline that is not `Stopped` ignores the call.
    pub async fn start(&mut self) {
        if self.state != PipelineState::Stopped {
            return;
        }
        self.state = PipelineState::Starting;
        info!(interval = ?self.interval, "starting conversation pipeline");

        // First pass runs to completion before the schedule begins
        self.worker.tick().await;

        let worker = Arc::clone(&self.worker);
        let interval = self.interval;
        self.task = Some(tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                worker.tick().await;
            }
        }));
        self.state = PipelineState::Running;
    }

    /// Stop the periodic processing
    ///
    /// Cancels the recurring task at its current await point and waits for
    /// it to wind down. Stopping an already stopped pipeline is a no-op.
    /// A tick interrupted mid-write leaves the snapshot at its previous
    /// content; the atomic store never exposes partial documents.
    pub async fn stop(&mut self) {
        if self.state != PipelineState::Running {
            return;
        }
        self.state = PipelineState::Stopping;

        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
        }

        self.state = PipelineState::Stopped;
        info!("conversation pipeline stopped");
    }

    /// Run a single tick outside the schedule
    pub async fn process_conversation(&self) -> Result<Option<ExtractionResult>> {
        self.worker.process_conversation().await
    }

    /// Outcome of the most recent tick that saw a transcript
    pub fn last_extraction(&self) -> Option<ExtractionResult> {
        self.worker
            .last_extraction
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }
}

impl<A> Drop for ConversationPipeline<A> {
    fn drop(&mut self) {
        // A pipeline dropped without stop() must not leave the task behind
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl<A: MarketDataApi> TickWorker<A> {
    /// Tick boundary: errors end here, the schedule continues
    async fn tick(&self) {
        if let Err(err) = self.process_conversation().await {
            error!(error = %err, "conversation tick failed");
        }
    }

    /// One pass: read transcript, extract companies, fetch, persist
    ///
    /// Returns `Ok(None)` when there is no transcript yet. A zero-match
    /// extraction performs no fetch and leaves the snapshot untouched, as
    /// does a fetch that comes back as an error envelope.
    async fn process_conversation(&self) -> Result<Option<ExtractionResult>> {
        let Some(bytes) = self.store.read(&self.conversation_path)? else {
            warn!(path = %self.conversation_path.display(), "transcript not found, skipping tick");
            return Ok(None);
        };

        let text = String::from_utf8_lossy(&bytes);
        let extraction = self.extractor.scan(&text);

        if let Some(company) = extraction.mentioned_companies.first() {
            info!(companies = ?extraction.mentioned_companies, "companies mentioned in conversation");

            let report = self.controller.get_stock_data(company, None, None).await;
            if report.is_success() {
                let body = serde_json::to_vec_pretty(&report)?;
                self.store.write(&self.snapshot_path, &body)?;
                debug!(%company, path = %self.snapshot_path.display(), "stock snapshot updated");
            } else {
                warn!(%company, "stock data fetch failed, keeping previous snapshot");
            }
        } else {
            debug!("no companies mentioned in conversation");
        }

        if let Ok(mut guard) = self.last_extraction.lock() {
            *guard = Some(extraction.clone());
        }
        Ok(Some(extraction))
    }
}
