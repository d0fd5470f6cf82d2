// HTTP server module
// Serves the form pages and handles submissions

mod handlers;

pub use handlers::{create_router, health_check, AppError};

use anyhow::{Context, Result};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::providers::ContentGenerator;
use crate::render::PageRenderer;

/// Main assistant server structure
pub struct AssistantServer {
    /// Content generator (shared across requests)
    generator: Arc<dyn ContentGenerator>,
    /// Page renderer (shared, immutable)
    renderer: Arc<PageRenderer>,
    /// Server configuration
    config: ServerConfig,
}

impl AssistantServer {
    pub fn new(
        config: ServerConfig,
        generator: Arc<dyn ContentGenerator>,
        renderer: PageRenderer,
    ) -> Self {
        Self {
            generator,
            renderer: Arc::new(renderer),
            config,
        }
    }

    /// Start the HTTP server and run until Ctrl-C or SIGTERM
    pub async fn serve(self) -> Result<()> {
        let bind_address = self.config().bind_address();
        let generator_name = self.generator.name().to_string();
        let app = create_router(Arc::new(self)).layer(TraceLayer::new_for_http());

        let listener = tokio::net::TcpListener::bind(&bind_address)
            .await
            .with_context(|| format!("Failed to bind {}", bind_address))?;
        let addr = listener.local_addr().context("Failed to read bound address")?;

        tracing::info!(generator = %generator_name, "Starting parenting assistant on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server error")?;

        tracing::info!("Server stopped");
        Ok(())
    }

    pub fn generator(&self) -> &Arc<dyn ContentGenerator> {
        &self.generator
    }

    pub fn renderer(&self) -> &Arc<PageRenderer> {
        &self.renderer
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
