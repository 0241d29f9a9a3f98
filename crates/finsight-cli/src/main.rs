//! Startup binary for the finsight backend
//!
//! Wires the market data client, controller, and file store together,
//! builds the customer stock snapshot once, then runs the conversation
//! pipeline until Ctrl-C.

use clap::Parser;
use finsight_client::{MarketClient, MarketClientConfig};
use finsight_pipeline::{
    ConversationPipeline, CustomerDirectory, CustomerSnapshotBuilder, FileStore, LocalFileStore,
    MarketDataController, PipelineConfig,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "finsight")]
#[command(about = "Conversation-driven stock snapshot backend", long_about = None)]
struct Args {
    /// Directory holding the transcript and snapshot files
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Base URL of the financial-data chat API
    #[arg(long)]
    api_base: Option<String>,

    /// Customer whose portfolio snapshot is built at startup
    #[arg(long, default_value = "c007")]
    customer_id: String,

    /// Seconds between conversation ticks
    #[arg(long, default_value_t = 5)]
    tick_interval: u64,

    /// JSON file holding the company vocabulary (array of names)
    #[arg(long)]
    vocabulary: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    finsight_utils::init_tracing();

    let args = Args::parse();

    let mut config_builder = PipelineConfig::builder()
        .data_dir(args.data_dir.clone())
        .tick_interval(Duration::from_secs(args.tick_interval));
    if let Some(path) = &args.vocabulary {
        config_builder = config_builder.vocabulary_file(path)?;
    }
    let config = config_builder.build()?;

    let client_config = match &args.api_base {
        Some(base) => MarketClientConfig::new(base.clone()),
        None => MarketClientConfig::from_env(),
    };
    let client = MarketClient::new(client_config)?;
    let controller = Arc::new(MarketDataController::new(client));
    let store: Arc<dyn FileStore> = Arc::new(LocalFileStore);

    // One-shot portfolio snapshot before the periodic pipeline begins
    match CustomerDirectory::load(store.as_ref(), &config.customer_path()) {
        Ok(directory) => {
            let builder = CustomerSnapshotBuilder::new(
                directory,
                Arc::clone(&controller),
                Arc::clone(&store),
                config.customer_snapshot_path(),
            );
            if !builder.build(&args.customer_id).await {
                warn!(customer_id = %args.customer_id, "customer stock snapshot was not written");
            }
        }
        Err(err) => {
            warn!(error = %err, "customer records unavailable, skipping portfolio snapshot");
        }
    }

    let mut pipeline = ConversationPipeline::new(&config, controller, store)?;
    pipeline.start().await;
    info!("finsight is ready");

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");
    pipeline.stop().await;

    Ok(())
}
