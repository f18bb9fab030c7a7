//! Main entry point for the jsonloc server.

use anyhow::Context;
use jsonloc_config::{ConfigLoader, LoggingConfig};
use jsonloc_server::LocalizationServer;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load().map_err(|e| anyhow::anyhow!(e))?;

    init_tracing(&config.logging);

    info!("Starting jsonloc server");

    let server = LocalizationServer::new(config).context("Failed to initialize server")?;

    if let Err(e) = server.start().await {
        error!("Server failed: {}", e);
        return Err(e.into());
    }

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=debug", logging.level)));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
