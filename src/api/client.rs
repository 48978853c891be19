use std::time::Instant;

use reqwest::StatusCode;
use tracing::{debug, info, warn};

use crate::config::BackendConfig;
use crate::metrics::{Metrics, MetricsRecorder};
use crate::models::{LoginToken, NewAccount, Profile};

pub const NEW_CLIENT_ENDPOINT: &str = "/newClient";
pub const LOGIN_ENDPOINT: &str = "/login";
pub const PROFILE_ENDPOINT: &str = "/profile";

/// Errors from backend calls whose responses we interpret.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request to backend failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode backend response: {0}")]
    Decode(String),
}

impl ApiError {
    /// The HTTP status returned by the backend, if it answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Thin wrapper around `reqwest::Client` bound to one backend base URL.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    metrics: Option<Metrics>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!("Creating backend API client for '{}'", base_url);
        Self {
            client: reqwest::Client::new(),
            base_url,
            metrics: None,
        }
    }

    pub fn from_config(config: &BackendConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn observe(&self, endpoint: &str, result: &str, started: Instant) {
        if let Some(metrics) = &self.metrics {
            metrics.record_backend_request(endpoint, result);
            metrics.record_backend_duration(endpoint, started.elapsed().as_secs_f64());
        }
    }

    /// Issues exactly one `POST /newClient` with `{username, password}`.
    ///
    /// The response (any status) or the transport error is returned as-is.
    pub async fn create_client_account(
        &self,
        username: &str,
        password: &str,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let body = NewAccount {
            username: username.to_string(),
            password: password.to_string(),
        };
        debug!(username, "Sending account creation request");

        let started = Instant::now();
        let result = self
            .client
            .post(self.url(NEW_CLIENT_ENDPOINT))
            .json(&body)
            .send()
            .await;

        let label = match &result {
            Ok(response) if response.status().is_success() => "success",
            Ok(_) => "rejected",
            Err(_) => "transport_error",
        };
        self.observe(NEW_CLIENT_ENDPOINT, label, started);
        result
    }

    /// Exchanges credentials for a session token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let body = NewAccount {
            username: username.to_string(),
            password: password.to_string(),
        };
        let started = Instant::now();
        let response = match self
            .client
            .post(self.url(LOGIN_ENDPOINT))
            .json(&body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                self.observe(LOGIN_ENDPOINT, "transport_error", started);
                return Err(e.into());
            }
        };

        let status = response.status();
        if !status.is_success() {
            self.observe(LOGIN_ENDPOINT, "rejected", started);
            let body = response.text().await.unwrap_or_default();
            debug!(username, status = status.as_u16(), "Backend rejected login");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        self.observe(LOGIN_ENDPOINT, "success", started);
        let token = response
            .json::<LoginToken>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        info!(username, "Backend login succeeded");
        Ok(token.token)
    }

    /// Looks up the profile behind `token`. `Ok(None)` means the backend does not
    /// know the token.
    pub async fn profile(&self, token: &str) -> Result<Option<Profile>, ApiError> {
        let started = Instant::now();
        let response = match self
            .client
            .get(self.url(PROFILE_ENDPOINT))
            .header("Authorization", token)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                self.observe(PROFILE_ENDPOINT, "transport_error", started);
                return Err(e.into());
            }
        };

        match response.status() {
            status if status.is_success() => {
                self.observe(PROFILE_ENDPOINT, "success", started);
                let profile = response
                    .json::<Profile>()
                    .await
                    .map_err(|e| ApiError::Decode(e.to_string()))?;
                Ok(Some(profile))
            }
            StatusCode::UNAUTHORIZED => {
                self.observe(PROFILE_ENDPOINT, "rejected", started);
                Ok(None)
            }
            status => {
                self.observe(PROFILE_ENDPOINT, "error", started);
                let body = response.text().await.unwrap_or_default();
                warn!(status = status.as_u16(), "Unexpected status from profile endpoint");
                Err(ApiError::Status {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}
