use async_trait::async_trait;

/// Failures of the session collaborator itself (not "logged out").
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("session verification failed: {0}")]
    Verification(String),
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// The two-method capability the auth gate and logout handler consume.
///
/// `is_logged_in` may suspend (e.g. a backend round-trip); callers must await
/// it before letting a navigation resolve.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn is_logged_in(&self) -> Result<bool, SessionError>;
    async fn logout(&self) -> Result<(), SessionError>;
}
