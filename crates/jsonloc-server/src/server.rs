//! Server lifecycle: engine construction, preload and serving.

use crate::error::{ServerError, ServerResult};
use crate::routes::{create_router, AppState};
use axum::Router;
use jsonloc_common::JsonlocError;
use jsonloc_config::{Config, ConfigCache, ConfigValidator};
use jsonloc_i18n::LocalizationEngine;
use std::sync::Arc;
use tracing::{info, warn};

/// Main server structure.
pub struct LocalizationServer {
    config: Arc<ConfigCache>,
    engine: Arc<LocalizationEngine>,
}

impl LocalizationServer {
    /// Creates a server for a validated configuration.
    pub fn new(config: Config) -> ServerResult<Self> {
        ConfigValidator::validate(&config)
            .map_err(|errors| JsonlocError::config(errors.join("; ")))?;

        let engine = LocalizationEngine::from_config(&config)?;
        Ok(Self {
            config: Arc::new(ConfigCache::new(config)),
            engine: Arc::new(engine),
        })
    }

    /// The shared localization engine.
    pub fn engine(&self) -> &Arc<LocalizationEngine> {
        &self.engine
    }

    /// Router serving this server's endpoints.
    pub fn router(&self) -> Router {
        create_router(AppState {
            engine: Arc::clone(&self.engine),
            config: Arc::clone(&self.config),
        })
    }

    /// Loads resources when configured to, binds and serves until shutdown.
    pub async fn start(&self) -> ServerResult<()> {
        let config = self.config.get();

        if config.localization.preload {
            let loaded = self.engine.warm_up().await;
            if loaded.is_empty() {
                warn!("No culture resources could be preloaded");
            }
        }

        let bind_address = &config.server.bind_address;
        info!("Starting localization server on {}", bind_address);

        let listener = tokio::net::TcpListener::bind(bind_address.as_str())
            .await
            .map_err(ServerError::Io)?;

        info!("Localization server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Localization server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
