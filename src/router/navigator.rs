use std::sync::Arc;

use tokio::sync::{watch, RwLock};
use tracing::debug;

use super::table::{Resolution, RouteTable, View};
use crate::gate::{AuthGate, GateError, LogoutHandler};
use crate::models::NavigationIntent;
use crate::session::SessionStore;

/// Redirect chains longer than this are treated as a loop.
const MAX_REDIRECTS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The navigation ended on `view` at `path` (after following redirects).
    Settled { path: String, view: View },
    /// A newer navigation started before this one finished.
    Cancelled,
    NotFound { path: String },
}

/// Headless client-side router.
///
/// Each `push` holds its navigation until the guards have resolved. Starting a
/// new `push` cancels any navigation still waiting on a guard; the cancelled
/// one leaves `current()` untouched.
pub struct Navigator {
    table: Arc<RouteTable>,
    gate: AuthGate,
    logout: LogoutHandler,
    session: Arc<dyn SessionStore>,
    generation: watch::Sender<u64>,
    current: RwLock<Option<(String, View)>>,
}

impl Navigator {
    pub fn new(table: Arc<RouteTable>, gate: AuthGate, session: Arc<dyn SessionStore>) -> Self {
        let (generation, _) = watch::channel(0);
        Self {
            table,
            gate,
            logout: LogoutHandler::new(),
            session,
            generation,
            current: RwLock::new(None),
        }
    }

    /// The path and view of the last settled navigation.
    pub async fn current(&self) -> Option<(String, View)> {
        self.current.read().await.clone()
    }

    pub async fn push(&self, full_path: &str) -> Result<NavigationOutcome, GateError> {
        let mut mine = 0;
        self.generation.send_modify(|g| {
            *g += 1;
            mine = *g;
        });
        let mut ticket = self.generation.subscribe();
        if *ticket.borrow() != mine {
            return Ok(NavigationOutcome::Cancelled);
        }

        let mut intent = NavigationIntent::new(full_path);
        for _ in 0..=MAX_REDIRECTS {
            let resolution = tokio::select! {
                biased;
                _ = superseded(&mut ticket, mine) => {
                    debug!("Navigation to '{}' cancelled by a newer one", intent.target_path);
                    return Ok(NavigationOutcome::Cancelled);
                }
                resolution = self.table.dispatch(
                    &intent,
                    self.session.as_ref(),
                    &self.gate,
                    &self.logout,
                ) => resolution?,
            };

            match resolution {
                Resolution::Render(view) => {
                    let mut current = self.current.write().await;
                    if *self.generation.borrow() != mine {
                        return Ok(NavigationOutcome::Cancelled);
                    }
                    *current = Some((intent.target_path.clone(), view));
                    return Ok(NavigationOutcome::Settled {
                        path: intent.target_path,
                        view,
                    });
                }
                Resolution::Redirect(redirect) => {
                    debug!(
                        "Navigation to '{}' redirected to '{}'",
                        intent.target_path,
                        redirect.location()
                    );
                    intent = NavigationIntent::new(redirect.location());
                }
                Resolution::NotFound => {
                    return Ok(NavigationOutcome::NotFound {
                        path: intent.target_path,
                    });
                }
            }
        }

        Err(GateError::TooManyRedirects(full_path.to_string()))
    }
}

/// Resolves once the navigation generation moves past `mine`.
async fn superseded(ticket: &mut watch::Receiver<u64>, mine: u64) {
    loop {
        if ticket.changed().await.is_err() {
            // Sender gone: nothing can supersede us any more.
            std::future::pending::<()>().await;
        }
        if *ticket.borrow_and_update() != mine {
            return;
        }
    }
}
