//! HTTP server implementation.

use std::net::SocketAddr;

use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::Settings;

use super::handlers::{add_question, health_check, random_questions};
use super::middleware::tower_trace;
use super::state::AppState;

/// Build the API router around `state`.
pub fn build_routes(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(health_check))
        .route("/status", get(health_check))
        .route("/questions/random", post(random_questions))
        .route("/questions", post(add_question))
        .with_state(state);

    tower_trace(routes)
}

/// Run the question server until Ctrl-C.
pub async fn run(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::from_settings(&settings)?;
    let stats = state.store.stats()?;
    info!(
        questions = stats.total,
        subjects = stats.subjects.len(),
        "question bank ready"
    );

    let listener = TcpListener::bind(&settings.server.address).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(
        listener,
        build_routes(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(%err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
