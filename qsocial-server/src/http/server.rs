//! Axum server setup
//!
//! Server skeleton with:
//! - CORS allow-list from configuration
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use qsocial_core::AppConfig;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use crate::service::MessageService;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:3001)
    pub bind_addr: SocketAddr,

    /// Browser origins allowed to call the API. `*` allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_app_config(&AppConfig::default(), IpAddr::V4(Ipv4Addr::LOCALHOST))
    }
}

impl ServerConfig {
    pub fn from_app_config(config: &AppConfig, host: IpAddr) -> Self {
        Self {
            bind_addr: SocketAddr::new(host, config.port),
            cors_origins: config.cors_origins.clone(),
        }
    }
}

/// Shared application state
pub struct AppState {
    pub service: MessageService,
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid CORS origin '{0}'")]
    InvalidOrigin(String),
}

/// CORS layer for the configured origins.
///
/// Requests from other origins get no CORS headers, so browsers refuse the response.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, ServerError> {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS: wildcard origin configured - all origins allowed");
        return Ok(base.allow_origin(Any));
    }

    let parsed = origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .map_err(|_| ServerError::InvalidOrigin(o.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(base.allow_origin(AllowOrigin::list(parsed)))
}

/// Build the application router.
pub fn build_router(service: MessageService, cors_origins: &[String]) -> Result<Router, ServerError> {
    let state = AppState { service };

    Ok(Router::new()
        .merge(routes::health::router())
        .merge(routes::messages::router())
        .layer(cors_layer(cors_origins)?)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state)))
}

/// Run the HTTP server until Ctrl+C or SIGTERM.
///
/// # Example
///
/// ```ignore
/// let store = open_store(&app_config.database_url).await?;
/// let config = ServerConfig::from_app_config(&app_config, host);
/// run_server(MessageService::new(store), config).await?;
/// ```
pub async fn run_server(service: MessageService, config: ServerConfig) -> Result<(), ServerError> {
    tracing::info!(
        store = service.store_kind(),
        origins = ?config.cors_origins,
        "starting qsocial API"
    );

    let app = build_router(service, &config.cors_origins)?;

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}
