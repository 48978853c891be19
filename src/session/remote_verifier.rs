use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cached::{Cached, TimedCache};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::base::SessionError;
use super::verifier::TokenVerifier;
use crate::api::ApiClient;
use crate::config::RemoteVerifierConfig;
use crate::utils::log_throttle::LogThrottle;

const FAILURE_LOG_WINDOW: Duration = Duration::from_secs(30);

/// Verifies tokens with the backend's `GET /profile`, remembering answers
/// for `cache_ttl_seconds`.
pub struct RemoteVerifier {
    api: Arc<ApiClient>,
    cache: Option<Mutex<TimedCache<String, bool>>>,
    failures: LogThrottle,
}

impl RemoteVerifier {
    pub fn new(config: &RemoteVerifierConfig, api: Arc<ApiClient>) -> Self {
        let cache = (config.cache_ttl_seconds > 0)
            .then(|| Mutex::new(TimedCache::with_lifespan(config.cache_ttl_seconds)));
        Self {
            api,
            cache,
            failures: LogThrottle::new(FAILURE_LOG_WINDOW),
        }
    }

    async fn cached(&self, token: &str) -> Option<bool> {
        let cache = self.cache.as_ref()?;
        let mut cache = cache.lock().await;
        cache.cache_get(token).copied()
    }

    async fn remember(&self, token: &str, valid: bool) {
        if let Some(cache) = &self.cache {
            cache.lock().await.cache_set(token.to_string(), valid);
        }
    }
}

#[async_trait]
impl TokenVerifier for RemoteVerifier {
    fn get_name(&self) -> &str {
        "remote"
    }

    async fn verify(&self, token: &str) -> Result<bool, SessionError> {
        if let Some(valid) = self.cached(token).await {
            debug!(
                event_name = "session.remote_verifier.cache.hit",
                event_domain = "session",
                valid,
                "token verification served from cache"
            );
            return Ok(valid);
        }

        match self.api.profile(token).await {
            Ok(profile) => {
                let valid = profile.is_some();
                if let Some(profile) = profile {
                    debug!("Token belongs to user '{}'", profile.username);
                }
                self.remember(token, valid).await;
                Ok(valid)
            }
            Err(e) => {
                if let Some(suppressed_count) =
                    self.failures.should_emit("session.remote_verifier.failure")
                {
                    warn!(
                        event_name = "session.remote_verifier.failure",
                        event_domain = "session",
                        suppressed_count,
                        "token verification failed: {}",
                        e
                    );
                }
                Err(SessionError::Verification(e.to_string()))
            }
        }
    }

    async fn forget(&self, token: &str) {
        if let Some(cache) = &self.cache {
            cache.lock().await.cache_remove(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn verifier(url: String, ttl: u64) -> RemoteVerifier {
        RemoteVerifier::new(
            &RemoteVerifierConfig {
                cache_ttl_seconds: ttl,
            },
            Arc::new(ApiClient::new(url)),
        )
    }

    #[tokio::test]
    async fn test_known_token_is_valid() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/profile")
            .match_header("authorization", "GOOD")
            .with_status(200)
            .with_body(r#"{"username": "alice", "role": "client"}"#)
            .create_async()
            .await;

        let result = verifier(server.url(), 0).verify("GOOD").await;
        m.assert_async().await;
        assert_eq!(result, Ok(true));
    }

    #[tokio::test]
    async fn test_unknown_token_is_invalid() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/profile")
            .with_status(401)
            .create_async()
            .await;

        assert_eq!(verifier(server.url(), 0).verify("BAD").await, Ok(false));
    }

    #[tokio::test]
    async fn test_backend_failure_is_an_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/profile")
            .with_status(500)
            .create_async()
            .await;

        let result = verifier(server.url(), 0).verify("GOOD").await;
        assert!(matches!(result, Err(SessionError::Verification(_))));
    }

    #[tokio::test]
    async fn test_results_are_cached() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/profile")
            .with_status(200)
            .with_body(r#"{"username": "alice"}"#)
            .expect(1)
            .create_async()
            .await;

        let v = verifier(server.url(), 60);
        assert_eq!(v.verify("GOOD").await, Ok(true));
        assert_eq!(v.verify("GOOD").await, Ok(true));
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_forget_evicts_cached_token() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/profile")
            .with_status(200)
            .with_body(r#"{"username": "alice"}"#)
            .expect(2)
            .create_async()
            .await;

        let v = verifier(server.url(), 60);
        v.verify("GOOD").await.unwrap();
        v.forget("GOOD").await;
        v.verify("GOOD").await.unwrap();
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/profile")
            .with_status(503)
            .expect(2)
            .create_async()
            .await;

        let v = verifier(server.url(), 60);
        assert!(v.verify("GOOD").await.is_err());
        assert!(v.verify("GOOD").await.is_err());
        m.assert_async().await;
    }
}
