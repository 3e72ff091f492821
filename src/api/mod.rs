//! HTTP API over the event operations.

pub mod error;
pub mod handlers;

use crate::db::pool::Database;
use crate::errors::AppResult;
use axum::{
    Router,
    routing::{get, post},
};
use std::future::Future;
use std::net::SocketAddr;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::read_root))
        .route("/event", post(handlers::create_event_endpoint))
        .route("/event/week", get(handlers::get_events_in_week))
        .route("/event/todo", get(handlers::get_todo))
        .route("/event/todo/split", get(handlers::get_todo_split))
        .route("/event/{id}", get(handlers::get_event_by_id))
        .route("/event/{id}/complete", post(handlers::complete_event_endpoint))
        .with_state(state)
}

/// Serve the API until `shutdown` resolves.
pub async fn serve(
    addr: SocketAddr,
    db: Database,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> AppResult<()> {
    // make sure the schema is in place before accepting requests
    drop(db.session()?);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{}", listener.local_addr()?);

    let app = build_router(AppState::new(db));
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("server stopped");
    Ok(())
}
