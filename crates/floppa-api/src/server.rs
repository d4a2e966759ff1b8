//! Router setup and server lifecycle.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

use floppa_core::error::TransportError;

use crate::animals::AnimalRegistry;
use crate::handlers;

/// Shared state of the gateway.
#[derive(Debug, Clone)]
pub struct AppState {
    pub animals: Arc<AnimalRegistry>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(animals: AnimalRegistry, request_timeout: Duration) -> Self {
        Self {
            animals: Arc::new(animals),
            request_timeout,
        }
    }

    /// Run a source call under the request deadline.
    ///
    /// An expired deadline drops the call, aborting any in-flight store
    /// request, and is reported as a transport timeout.
    pub async fn with_deadline<T>(
        &self,
        fut: impl Future<Output = floppa_core::Result<T>>,
    ) -> floppa_core::Result<T> {
        match tokio::time::timeout(self.request_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(TransportError::Timeout {
                duration_ms: self.request_timeout.as_millis() as u64,
            }
            .into()),
        }
    }
}

/// Build the gateway router.
///
/// Fixed routes take precedence over the per-animal `/{animal}` routes.
pub fn build_router(state: AppState, frontend_dir: &Path) -> Router {
    Router::new()
        .route("/api/animals", get(handlers::list_animals))
        .route("/health", get(handlers::health))
        .route("/{animal}", get(handlers::random_image))
        .route("/{animal}/count", get(handlers::count))
        .route(
            "/{animal}/vim/{external_id}",
            get(handlers::image_by_external_id),
        )
        .route_service("/", ServeFile::new(frontend_dir.join("index.html")))
        .nest_service("/assets", ServeDir::new(frontend_dir.join("assets")))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve `router` on `listener` until Ctrl+C or SIGTERM.
pub async fn serve(listener: TcpListener, router: Router) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "Listening");
    }

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
