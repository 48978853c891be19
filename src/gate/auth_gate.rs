use tracing::{debug, warn};

use crate::config::{GateConfig, SessionFailurePolicy};
use crate::models::{GateDecision, NavigationIntent, Redirect};
use crate::session::{SessionError, SessionStore};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    #[error("session check failed: {0}")]
    Session(#[from] SessionError),
    #[error("too many redirects while navigating to '{0}'")]
    TooManyRedirects(String),
}

/// Decides whether a navigation to a protected route may proceed.
///
/// Holds no session state of its own; the session is passed to every call.
#[derive(Debug, Clone, Default)]
pub struct AuthGate {
    on_session_error: SessionFailurePolicy,
}

impl AuthGate {
    pub fn new(on_session_error: SessionFailurePolicy) -> Self {
        Self { on_session_error }
    }

    pub fn from_config(config: &GateConfig) -> Self {
        Self::new(config.on_session_error)
    }

    /// `Allow` for a logged-in session, otherwise a redirect to `/login` with
    /// `redirect=<intent.target_path>`. Never mutates the session.
    pub async fn evaluate(
        &self,
        session: &dyn SessionStore,
        intent: &NavigationIntent,
    ) -> Result<GateDecision, GateError> {
        match session.is_logged_in().await {
            Ok(true) => {
                debug!("Gate allows navigation to '{}'", intent.target_path);
                Ok(GateDecision::Allow)
            }
            Ok(false) => {
                debug!(
                    "Gate redirects logged-out navigation to '{}'",
                    intent.target_path
                );
                Ok(GateDecision::Redirect(Redirect::to_login(&intent.target_path)))
            }
            Err(e) => match self.on_session_error {
                SessionFailurePolicy::Propagate => Err(e.into()),
                SessionFailurePolicy::Redirect => {
                    warn!(
                        "Session check failed for '{}', treating as logged out: {}",
                        intent.target_path, e
                    );
                    Ok(GateDecision::Redirect(Redirect::to_login(&intent.target_path)))
                }
                SessionFailurePolicy::Allow => {
                    warn!(
                        "Session check failed for '{}', allowing navigation: {}",
                        intent.target_path, e
                    );
                    Ok(GateDecision::Allow)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::navigation::{LOGIN_PATH, REDIRECT_PARAM};
    use crate::test_support::FakeSession;

    #[tokio::test]
    async fn test_logged_out_redirects_to_login_with_target() {
        let session = FakeSession::logged_out();
        let intent = NavigationIntent::new("/dashboard");

        let decision = AuthGate::default().evaluate(&session, &intent).await.unwrap();

        match decision {
            GateDecision::Redirect(redirect) => {
                assert_eq!(redirect.path, LOGIN_PATH);
                assert_eq!(redirect.query.len(), 1);
                assert_eq!(redirect.query[REDIRECT_PARAM], "/dashboard");
            }
            other => panic!("expected redirect, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_target_with_query_is_preserved_verbatim() {
        let session = FakeSession::logged_out();
        let target = "/dashboard?city=New%20York&sort=price#top";
        let intent = NavigationIntent::new(target);

        let decision = AuthGate::default().evaluate(&session, &intent).await.unwrap();

        assert_eq!(decision, GateDecision::Redirect(Redirect::to_login(target)));
        if let GateDecision::Redirect(redirect) = decision {
            assert_eq!(redirect.query[REDIRECT_PARAM].as_bytes(), target.as_bytes());
        }
    }

    #[tokio::test]
    async fn test_logged_in_allows_without_mutating_session() {
        let session = FakeSession::logged_in();
        let intent = NavigationIntent::new("/dashboard");

        let decision = AuthGate::default().evaluate(&session, &intent).await.unwrap();

        assert_eq!(decision, GateDecision::Allow);
        assert_eq!(session.logout_calls(), 0);
        assert!(session.is_logged_in().await.unwrap());
    }

    #[tokio::test]
    async fn test_evaluate_is_idempotent() {
        let gate = AuthGate::default();
        let intent = NavigationIntent::new("/?tab=1");

        for session in [FakeSession::logged_in(), FakeSession::logged_out()] {
            let first = gate.evaluate(&session, &intent).await.unwrap();
            let second = gate.evaluate(&session, &intent).await.unwrap();
            assert_eq!(first, second);
            assert_eq!(session.check_calls(), 2);
        }
    }

    #[tokio::test]
    async fn test_session_failure_propagates_by_default() {
        let session = FakeSession::failing();
        let intent = NavigationIntent::new("/dashboard");

        let result = AuthGate::default().evaluate(&session, &intent).await;

        assert!(matches!(result, Err(GateError::Session(SessionError::Unavailable(_)))));
    }

    #[tokio::test]
    async fn test_session_failure_fail_closed() {
        let session = FakeSession::failing();
        let intent = NavigationIntent::new("/dashboard");
        let gate = AuthGate::new(SessionFailurePolicy::Redirect);

        let decision = gate.evaluate(&session, &intent).await.unwrap();

        assert_eq!(decision, GateDecision::Redirect(Redirect::to_login("/dashboard")));
    }

    #[tokio::test]
    async fn test_session_failure_fail_open() {
        let session = FakeSession::failing();
        let intent = NavigationIntent::new("/dashboard");
        let gate = AuthGate::new(SessionFailurePolicy::Allow);

        let decision = gate.evaluate(&session, &intent).await.unwrap();

        assert_eq!(decision, GateDecision::Allow);
    }
}
