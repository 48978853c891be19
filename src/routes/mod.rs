//! HTTP route definitions and handlers.
//!
//! This module organizes all HTTP endpoints into logical groups:
//! client views, form submissions, metrics and health checks.

mod form_routes;
mod health_routes;
mod metrics_routes;
mod view_routes;

use crate::state::AppState;
use axum::Router;

/// Creates the application router with all configured routes.
///
/// Combines all route modules into a single router and attaches
/// the application state for access in handlers.
pub fn create_router(state: AppState) -> Router {
    let views = view_routes::routes(&state.routes);
    Router::new()
        .merge(views)
        .merge(form_routes::routes())
        .merge(health_routes::routes())
        .merge(metrics_routes::routes())
        .fallback(view_routes::fallback)
        .with_state(state)
}
