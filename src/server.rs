// Process bootstrap shared by both backend binaries

use axum::{http::HeaderValue, middleware, Router};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, CorsConfig};
use crate::error::configure_error_details;
use crate::infrastructure::middleware::request_id_middleware;

/// Initialize tracing. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub fn cors_layer(config: &CorsConfig) -> anyhow::Result<CorsLayer> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    Ok(match &config.origin {
        Some(origin) => layer.allow_origin(HeaderValue::from_str(origin)?),
        None => layer.allow_origin(Any),
    })
}

/// Wrap a backend router with the layers every service gets.
pub fn with_common_layers(router: Router, config: &Config) -> anyhow::Result<Router> {
    Ok(router
        .layer(cors_layer(&config.cors)?)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware)))
}

/// Apply process-wide settings derived from config, then serve until Ctrl-C.
pub async fn serve(router: Router, config: &Config) -> anyhow::Result<()> {
    configure_error_details(!config.service.environment.is_production());

    let app = with_common_layers(router, config)?;
    let addr = config.server_address();
    let listener = TcpListener::bind(&addr).await?;

    info!(
        service = config.service.kind.name(),
        environment = ?config.service.environment,
        "Server starting on http://{}",
        addr
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
