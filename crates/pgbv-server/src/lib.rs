#![forbid(unsafe_code)]

//! HTTP surface.
//!
//! | Route                | Response                                 |
//! |----------------------|------------------------------------------|
//! | `GET /`              | HTML list of tables                      |
//! | `GET /relations`     | JSON array of table names                |
//! | `GET /buffer_viz/:t` | SVG block map of table `t`               |
//! | `GET /readiness`     | `Ok`                                     |
//! | `GET /health`        | `Ok`                                     |

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use pgbv_db::BlockSource;
use pgbv_render::TableRenderer;
use tokio::net::TcpListener;

mod error;
mod handlers;

pub use error::AppError;

/// Shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn BlockSource>,
    pub renderer: TableRenderer,
    /// Embed the hover script in served images.
    pub interactive: bool,
    /// Upper bound on fetching one table.
    pub timeout: Duration,
}

impl AppState {
    pub fn new(source: Arc<dyn BlockSource>, renderer: TableRenderer) -> Self {
        Self {
            source,
            renderer,
            interactive: true,
            timeout: Duration::from_secs(5),
        }
    }

    #[must_use]
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let response = next.run(request).await;
    tracing::info!(%method, %path, status = response.status().as_u16(), "request");
    response
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/relations", get(handlers::relations))
        .route("/buffer_viz/:table", get(handlers::buffer_viz))
        .route("/readiness", get(handlers::readiness))
        .route("/health", get(handlers::health))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Serve until SIGINT or SIGTERM, then drain in-flight requests.
///
/// # Errors
///
/// Returns the I/O error that stopped the server.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "listening");
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "cannot listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown requested");
}
