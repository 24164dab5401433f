use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use discoteca::catalog::load_catalog;
use discoteca::config::NodeConfig;
use discoteca::node::run_server;

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

    let config = NodeConfig::load(&cli_args.config)?;
    let catalog = Arc::new(load_catalog(&config));

    info!("Ready to serve at port {}!", config.port);
    run_server(catalog, config.port).await
}
