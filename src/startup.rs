//! Application startup and server initialization.
//!
//! This module wires the application state from the configuration and
//! serves the client routes.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ConfigV1;
use crate::routes;
use crate::state::AppState;

/// Initializes and runs the web server.
///
/// # Errors
///
/// Returns an error if the server fails to bind to the configured address
/// or encounters a runtime error while serving.
pub async fn run(config: Arc<ConfigV1>) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new(config.clone());
    let app = routes::create_router(state);

    info!(
        "Starting rentals web server on {} (backend {})",
        config.bind_address, config.backend.base_url
    );
    let listener = TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
