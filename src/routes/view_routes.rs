//! Client view routes.
//!
//! Every path of the route table is served here. The request's session comes
//! from the session cookie and the route table decides whether to render the
//! view, redirect, or answer 404.

use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, warn};

use crate::metrics::MetricsRecorder;
use crate::models::navigation::REDIRECT_PARAM;
use crate::models::NavigationIntent;
use crate::router::{Resolution, RouteAction, RouteTable};
use crate::session::TokenSession;
use crate::state::AppState;
use crate::utils::http_helpers::{session_cookie_removal, HTTPError};
use crate::utils::shell::render_shell;

/// Registers a GET handler for every path and alias in `table`.
pub fn routes(table: &RouteTable) -> Router<AppState> {
    table
        .paths()
        .fold(Router::new(), |router, path| router.route(path, get(navigate)))
}

/// Handles paths the router has no exact entry for. GET requests still go
/// through the route table, which also matches case and trailing-slash
/// variants of its paths.
pub async fn fallback(
    method: Method,
    state: State<AppState>,
    session: TokenSession,
    jar: CookieJar,
    uri: Uri,
) -> Response {
    if method == Method::GET || method == Method::HEAD {
        navigate(state, session, jar, uri).await
    } else {
        HTTPError::new(StatusCode::NOT_FOUND, "Not found").into_response()
    }
}

async fn navigate(
    State(state): State<AppState>,
    session: TokenSession,
    jar: CookieJar,
    uri: Uri,
) -> Response {
    let full_path = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    let intent = NavigationIntent::new(full_path);

    let route = state.routes.resolve(intent.path());
    let route_name = route.map(|r| r.name).unwrap_or("unknown");
    let is_logout = route.is_some_and(|r| r.action == RouteAction::Logout);

    let resolution = state
        .routes
        .dispatch(&intent, &session, &state.gate, &state.logout)
        .await;

    match resolution {
        Ok(Resolution::Render(view)) => {
            state.metrics.record_navigation(route_name, "render");
            let redirect = intent.query_params.get(REDIRECT_PARAM).map(String::as_str);
            Html(render_shell(view, &state.config.maps, redirect)).into_response()
        }
        Ok(Resolution::Redirect(redirect)) => {
            state.metrics.record_navigation(route_name, "redirect");
            let location = redirect.location();
            info!(
                event_name = "navigation.redirected",
                event_domain = "navigation",
                route = route_name,
                location = %location,
                "Redirecting navigation"
            );
            if is_logout {
                let jar = jar.remove(session_cookie_removal(&state.config.session));
                (jar, Redirect::to(&location)).into_response()
            } else {
                Redirect::to(&location).into_response()
            }
        }
        Ok(Resolution::NotFound) => {
            state.metrics.record_navigation(route_name, "not_found");
            HTTPError::new(StatusCode::NOT_FOUND, "Not found").into_response()
        }
        Err(e) => {
            state.metrics.record_navigation(route_name, "error");
            warn!(
                event_name = "navigation.failed",
                event_domain = "navigation",
                route = route_name,
                error = %e,
                "Navigation failed"
            );
            HTTPError::new(StatusCode::SERVICE_UNAVAILABLE, e.to_string()).into_response()
        }
    }
}
