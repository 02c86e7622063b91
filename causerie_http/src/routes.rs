//! Router construction and server entry.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use causerie_conversation::SessionManager;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::handler;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<SessionManager>,
}

/// Build the application router.
#[must_use]
pub fn router(manager: Arc<SessionManager>) -> Router {
    Router::new()
        .route("/generate", post(handler::generate))
        .route("/health", get(handler::health))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { manager })
}

/// Bind and serve until the process is stopped.
pub async fn serve(bind: &str, manager: Arc<SessionManager>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Listening on {bind}");
    axum::serve(listener, router(manager)).await?;
    Ok(())
}
