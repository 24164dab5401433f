use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use discoteca::aggregator::{run_server, Aggregator};
use discoteca::config::AggregatorConfig;

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the JSON configuration file.
    #[clap(default_value = "config.json")]
    pub config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let config = AggregatorConfig::load(&cli_args.config)?;
    let aggregator = Arc::new(Aggregator::new(&config.nodes));
    aggregator.start(Duration::from_secs(config.refresh_interval_seconds));

    info!(
        "Mirroring {} media nodes every {} seconds",
        config.nodes.len(),
        config.refresh_interval_seconds
    );
    info!("Ready to serve at port {}!", config.port);
    run_server(aggregator, PathBuf::from(&config.frontend), config.port).await
}
