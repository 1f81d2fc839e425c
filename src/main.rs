//! Entente server - analysis service for a French FAQ chatbot.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::signal;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use entente::config::{IntentStrategy, ServerConfig};
use entente::engine::Engine;
use entente::handlers;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting entente server...");

    let config = ServerConfig::from_env();
    config.log();

    let engine = Arc::new(Engine::new(config.clone())?);

    // The classifier strategy needs a model before the first request;
    // training at startup is the one blocking batch step we accept.
    if config.intent_strategy == IntentStrategy::Classifier {
        match engine.train_blocking() {
            Ok(summary) => info!(
                "Startup training done: {} examples, holdout accuracy {:?}",
                summary.examples, summary.holdout_accuracy
            ),
            Err(e) => tracing::warn!(
                "Startup training skipped: {}. Falling back to the unknown intent until /train succeeds.",
                e
            ),
        }
    }

    let app = handlers::build_router(engine)
        .layer(TraceLayer::new_for_http())
        .layer(ConcurrencyLimitLayer::new(config.max_concurrent_requests))
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid listen address: {e}"))?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Handle graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
