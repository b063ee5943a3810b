//! HTTP server setup and lifecycle

use std::time::Duration;

use axum::{extract::DefaultBodyLimit, http::Method, routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

use crate::config::ServerConfig;
use crate::error::{ApiError, Result};
use crate::routes;
use crate::state::AppState;

/// The imagevault HTTP server
pub struct Server {
    config: ServerConfig,
    state: AppState,
}

impl Server {
    /// Create a server backed by the configured object store.
    pub fn new(config: ServerConfig) -> Self {
        let state = AppState::new(&config);
        Self { config, state }
    }

    /// Create a server around pre-built state.
    pub fn with_state(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Bind the listener and serve until a shutdown signal arrives.
    pub async fn start(self) -> Result<()> {
        let bind_address = self.config.bind_address();
        let app = self.into_router();

        let listener = TcpListener::bind(&bind_address).await.map_err(|err| {
            ApiError::Internal(format!("Failed to bind to {bind_address}: {err}"))
        })?;

        info!("Server listening on {bind_address}");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|err| ApiError::Internal(format!("Server error: {err}")))?;

        info!("Server shut down gracefully");
        Ok(())
    }

    /// Assemble the router with all routes and middleware.
    pub fn into_router(self) -> Router {
        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST])
            .allow_origin(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any);

        Router::new()
            .route("/health", get(routes::health::health_check))
            .nest("/files", routes::files::create_routes())
            .with_state(self.state)
            .layer(DefaultBodyLimit::max(self.config.server.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(
                self.config.server.timeout,
            )))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }
}

/// Resolve when the process receives ctrl-c or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received ctrl-c, shutting down");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        }
    }
}
