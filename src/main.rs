use anyhow::Result;
use clap::Parser;
use tracing::info;

use reblogsmith::config::Config;
use reblogsmith::telemetry;
use reblogsmith::ReblogSmith;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize telemetry
    telemetry::init();
    info!("Starting reblogsmith");

    // Parse configuration from CLI arguments / environment
    let config = Config::parse();
    info!(
        "Configuration: account={}, node_url={}, checkpoint_path={}, poll_interval_secs={}",
        config.account, config.node_url, config.checkpoint_path, config.poll_interval_secs
    );

    // Initialize and run the app
    let app = ReblogSmith::initialize(config)?;
    app.run().await?;

    info!("Reblogsmith shutdown complete");
    Ok(())
}
