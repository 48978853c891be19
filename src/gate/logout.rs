use tracing::info;

use crate::models::navigation::LOGIN_PATH;
use crate::models::{GateDecision, Redirect};
use crate::session::{SessionError, SessionStore};

/// Ends the session and sends the user back to the login view.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogoutHandler;

impl LogoutHandler {
    pub fn new() -> Self {
        LogoutHandler
    }

    /// Calls `session.logout()` exactly once, then redirects to `/login` with an
    /// empty query, whatever the prior session state was.
    pub async fn logout(&self, session: &dyn SessionStore) -> Result<GateDecision, SessionError> {
        session.logout().await?;
        info!("Session logged out");
        Ok(GateDecision::Redirect(Redirect::to(LOGIN_PATH)))
    }
}
