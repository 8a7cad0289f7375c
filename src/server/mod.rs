//! HTTP server for itinerary generation (axum).
//!
//! Listens on `HOST:PORT` (default 0.0.0.0:3001) and serves `POST /api/plan/generate`.
//!
//! **Public API**: [`run_serve`], [`run_serve_on_listener`], [`router`].

mod app;

use tokio::net::TcpListener;
use tracing::info;

use crate::{config::ServerConfig, core::Planner, error::Result};

pub use app::router;

/// Runs the server on an existing listener. Tests bind to 127.0.0.1:0 and pass the listener in.
pub async fn run_serve_on_listener(listener: TcpListener, planner: Planner) -> Result<()> {
    let addr = listener.local_addr()?;
    info!("Server is running on http://{}", addr);

    axum::serve(listener, router(planner)).await?;
    Ok(())
}

/// Binds `config.addr()` and runs the server until the process exits.
pub async fn run_serve(config: &ServerConfig, planner: Planner) -> Result<()> {
    let listener = TcpListener::bind(config.addr()).await?;
    run_serve_on_listener(listener, planner).await
}
