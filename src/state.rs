//! Shared application state.
//!
//! Contains the state that is shared across all request handlers: the
//! configuration, the route table with its guards, and the backend client.

use crate::api::ApiClient;
use crate::config::ConfigV1;
use crate::gate::{AuthGate, LogoutHandler, RedirectSanitizer};
use crate::metrics::Metrics;
use crate::router::RouteTable;
use crate::session::{create_verifier, TokenVerifier};
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    pub routes: Arc<RouteTable>,
    pub gate: AuthGate,
    pub logout: LogoutHandler,
    /// Validates the login form's `redirect` field.
    pub redirects: Arc<RedirectSanitizer>,
    /// Client for the rentals backend.
    pub api: Arc<ApiClient>,
    /// Checks session tokens taken from the session cookie.
    pub verifier: Arc<dyn TokenVerifier>,
    pub metrics: Metrics,
}

impl AppState {
    /// Wires every service from the configuration.
    pub fn new(config: Arc<ConfigV1>) -> Self {
        let metrics = Metrics::new();
        let api = Arc::new(ApiClient::from_config(&config.backend).with_metrics(metrics.clone()));
        let verifier = create_verifier(&config.session.verifier, api.clone());

        AppState {
            routes: Arc::new(RouteTable::default_routes()),
            gate: AuthGate::from_config(&config.gate),
            logout: LogoutHandler::new(),
            redirects: Arc::new(RedirectSanitizer::from_config(&config.gate)),
            api,
            verifier,
            metrics,
            config,
        }
    }
}
