use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::base::{SessionError, SessionStore};
use super::verifier::TokenVerifier;

/// A session backed by an opaque bearer token.
///
/// In the server one is built per request from the session cookie; the
/// client-side navigator keeps one for its whole lifetime.
pub struct TokenSession {
    token: RwLock<Option<String>>,
    verifier: Arc<dyn TokenVerifier>,
}

impl TokenSession {
    pub fn new(token: Option<String>, verifier: Arc<dyn TokenVerifier>) -> Self {
        let token = token.filter(|t| !t.is_empty());
        Self {
            token: RwLock::new(token),
            verifier,
        }
    }

    pub fn anonymous(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self::new(None, verifier)
    }

    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// Stores the token obtained from a successful login.
    pub async fn set_token(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into()).filter(|t| !t.is_empty());
    }
}

#[async_trait]
impl SessionStore for TokenSession {
    async fn is_logged_in(&self) -> Result<bool, SessionError> {
        let token = self.token.read().await.clone();
        match token {
            Some(token) => self.verifier.verify(&token).await,
            None => Ok(false),
        }
    }

    async fn logout(&self) -> Result<(), SessionError> {
        let previous = self.token.write().await.take();
        match previous {
            Some(token) => {
                self.verifier.forget(&token).await;
                debug!("Session token cleared via '{}' verifier", self.verifier.get_name());
            }
            None => debug!("Logout requested without an active session token"),
        }
        Ok(())
    }
}
