use tracing::debug;

use crate::gate::{AuthGate, GateError, LogoutHandler};
use crate::models::navigation::LOGIN_PATH;
use crate::models::{GateDecision, NavigationIntent, Redirect};
use crate::session::SessionStore;

pub const NEW_ACCOUNT_PATH: &str = "/new";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const LOGOUT_PATH: &str = "/logout";

/// The client views a navigation can end on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Login,
    NewAccount,
    Dashboard,
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::Login => "login",
            View::NewAccount => "new-account",
            View::Dashboard => "dashboard",
        }
    }
}

/// Whether a route runs the auth gate before its action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Open,
    RequireAuth,
}

/// What a route does once its guard lets the navigation through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAction {
    Render(View),
    Logout,
}

#[derive(Debug, Clone)]
pub struct Route {
    pub name: &'static str,
    pub path: &'static str,
    pub aliases: Vec<&'static str>,
    pub guard: Guard,
    pub action: RouteAction,
}

impl Route {
    /// Matches the path or an alias, ignoring ASCII case and one trailing `/`.
    fn matches(&self, path: &str) -> bool {
        let path = without_trailing_slash(path);
        std::iter::once(self.path)
            .chain(self.aliases.iter().copied())
            .any(|candidate| candidate.eq_ignore_ascii_case(path))
    }
}

fn without_trailing_slash(path: &str) -> &str {
    match path.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => path,
    }
}

/// How the route table settled one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Render(View),
    Redirect(Redirect),
    NotFound,
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// `/login` and `/new` open, `/dashboard` (alias `/`) behind the auth gate,
    /// `/logout` ending the session.
    pub fn default_routes() -> Self {
        Self::new(vec![
            Route {
                name: "login",
                path: LOGIN_PATH,
                aliases: vec![],
                guard: Guard::Open,
                action: RouteAction::Render(View::Login),
            },
            Route {
                name: "new-account",
                path: NEW_ACCOUNT_PATH,
                aliases: vec![],
                guard: Guard::Open,
                action: RouteAction::Render(View::NewAccount),
            },
            Route {
                name: "dashboard",
                path: DASHBOARD_PATH,
                aliases: vec!["/"],
                guard: Guard::RequireAuth,
                action: RouteAction::Render(View::Dashboard),
            },
            Route {
                name: "logout",
                path: LOGOUT_PATH,
                aliases: vec![],
                guard: Guard::Open,
                action: RouteAction::Logout,
            },
        ])
    }

    /// Every path and alias the table answers to.
    pub fn paths(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.routes
            .iter()
            .flat_map(|route| std::iter::once(route.path).chain(route.aliases.iter().copied()))
    }

    /// The route answering to `path`; the query string is not part of `path`.
    pub fn resolve(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.matches(path))
    }

    /// Runs the matched route's guard and action for `intent`.
    ///
    /// Open routes never consult the session.
    pub async fn dispatch(
        &self,
        intent: &NavigationIntent,
        session: &dyn SessionStore,
        gate: &AuthGate,
        logout: &LogoutHandler,
    ) -> Result<Resolution, GateError> {
        let Some(route) = self.resolve(intent.path()) else {
            debug!("No route for '{}'", intent.path());
            return Ok(Resolution::NotFound);
        };

        if route.guard == Guard::RequireAuth {
            if let GateDecision::Redirect(redirect) = gate.evaluate(session, intent).await? {
                return Ok(Resolution::Redirect(redirect));
            }
        }

        match route.action {
            RouteAction::Render(view) => Ok(Resolution::Render(view)),
            RouteAction::Logout => match logout.logout(session).await? {
                GateDecision::Redirect(redirect) => Ok(Resolution::Redirect(redirect)),
                GateDecision::Allow => Ok(Resolution::NotFound),
            },
        }
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::default_routes()
    }
}
