use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::base::SessionError;
use super::local_verifier::LocalVerifier;
use super::remote_verifier::RemoteVerifier;
use crate::api::ApiClient;
use crate::config::VerifierConfig;

/// Decides whether a session token still identifies a logged-in user.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    fn get_name(&self) -> &str;

    async fn verify(&self, token: &str) -> Result<bool, SessionError>;

    /// Drops anything remembered about `token`. Called on logout.
    async fn forget(&self, _token: &str) {}
}

/// Creates the verifier selected by the session config.
pub fn create_verifier(config: &VerifierConfig, api: Arc<ApiClient>) -> Arc<dyn TokenVerifier> {
    match config {
        VerifierConfig::Local => {
            info!("Session tokens are verified locally (presence only).");
            Arc::new(LocalVerifier::new())
        }
        VerifierConfig::Remote(remote) => {
            info!(
                "Session tokens are verified against '{}' (cache ttl {}s).",
                api.base_url(),
                remote.cache_ttl_seconds
            );
            Arc::new(RemoteVerifier::new(remote, api))
        }
    }
}
