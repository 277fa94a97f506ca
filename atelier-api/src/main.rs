use anyhow::Result;
use atelier_core::config::Config;
use atelier_core::shutdown::{install_signal_handlers, ShutdownCoordinator};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

mod api;
mod auth_routes;
mod comment_routes;
mod error;
mod project_routes;
mod state;
mod ws;

use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Config file path wins over the environment when given
    let config = match std::env::args().nth(1) {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };

    atelier_core::init_logging(&config.logging)?;

    info!("Atelier API server starting on {}", config.server.bind_address);

    let shutdown = Arc::new(ShutdownCoordinator::new(config.server.shutdown_timeout));
    install_signal_handlers(shutdown.clone());

    let state = AppState::new(&config);
    let router = api::build_router(state);

    let listener = TcpListener::bind(config.server.bind_address).await?;

    let drain = shutdown.clone();
    axum::serve(listener, router)
        .with_graceful_shutdown(async move { drain.wait_for_shutdown().await })
        .await?;

    info!("Atelier API server stopped");
    Ok(())
}
