//! Conversation-to-stock-data pipeline
//!
//! This crate turns a free-form conversation transcript into stock-data
//! snapshots served by the HTTP layer:
//!
//! - [`CompanyExtractor`]: scans text against a configured company
//!   vocabulary (case-insensitive, whole-word).
//! - [`MarketDataController`]: wraps the market data client; every
//!   operation resolves to a `status`-tagged envelope and never raises.
//! - [`ConversationPipeline`]: the periodic scheduler - read transcript,
//!   extract, fetch stock data for the first match, persist atomically.
//! - [`CustomerSnapshotBuilder`]: one-shot portfolio comparison snapshot
//!   for a customer from the static record file.
//! - [`store`]: the file storage seam plus the snapshot read used by HTTP
//!   handlers.
//!
//! # Example
//!
//! ```rust,ignore
//! use finsight_client::MarketClient;
//! use finsight_pipeline::{
//!     ConversationPipeline, LocalFileStore, MarketDataController, PipelineConfig,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = PipelineConfig::default();
//!     let controller = Arc::new(MarketDataController::new(MarketClient::from_env()?));
//!
//!     let mut pipeline =
//!         ConversationPipeline::new(&config, controller, Arc::new(LocalFileStore))?;
//!     pipeline.start().await;
//!
//!     tokio::signal::ctrl_c().await?;
//!     pipeline.stop().await;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod controller;
pub mod customer;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod report;
pub mod store;

// Re-export main types for convenience
pub use config::{DEFAULT_COMPANY_VOCABULARY, PipelineConfig};
pub use controller::MarketDataController;
pub use customer::{CustomerDirectory, CustomerRecord, CustomerSnapshotBuilder, Investment};
pub use error::{PipelineError, Result};
pub use extract::{CompanyExtractor, ExtractionResult};
pub use pipeline::{ConversationPipeline, PipelineState};
pub use report::{ComparisonReport, StockDataReport};
pub use store::{FileStore, LocalFileStore, snapshot_body};
