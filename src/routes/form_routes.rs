//! Form submissions from the login and account creation views.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::post;
use axum::{Form, Router};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::{info, warn};

use crate::api::ApiError;
use crate::models::navigation::LOGIN_PATH;
use crate::router::table::NEW_ACCOUNT_PATH;
use crate::state::AppState;
use crate::utils::http_helpers::{session_cookie, HTTPError};

/// Registers the POST handlers next to the GET views of the same paths.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(LOGIN_PATH, post(submit_login))
        .route(NEW_ACCOUNT_PATH, post(submit_new_account))
}

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
    #[serde(default)]
    redirect: Option<String>,
}

#[derive(Deserialize)]
struct NewAccountForm {
    username: String,
    password: String,
}

/// Logs in against the backend, stores the token in the session cookie and
/// forwards to the sanitized `redirect` target.
async fn submit_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Redirect), HTTPError> {
    let token = match state.api.login(&form.username, &form.password).await {
        Ok(token) => token,
        Err(ApiError::Status { status: 401, .. }) => {
            info!(username = %form.username, "Login rejected");
            return Err(HTTPError::new(
                StatusCode::UNAUTHORIZED,
                "Invalid username or password",
            ));
        }
        Err(e) => {
            warn!(username = %form.username, error = %e, "Login failed");
            return Err(HTTPError::new(StatusCode::BAD_GATEWAY, e.to_string()));
        }
    };

    let target = state.redirects.sanitize(form.redirect.as_deref()).to_string();
    info!(
        event_name = "session.login",
        event_domain = "session",
        username = %form.username,
        target = %target,
        "Login succeeded"
    );
    let jar = jar.add(session_cookie(&state.config.session, token));
    Ok((jar, Redirect::to(&target)))
}

/// Forwards the form to the backend's `POST /newClient` and relays its
/// status, content type and body.
async fn submit_new_account(
    State(state): State<AppState>,
    Form(form): Form<NewAccountForm>,
) -> Result<Response, HTTPError> {
    let backend = state
        .api
        .create_client_account(&form.username, &form.password)
        .await
        .map_err(|e| {
            warn!(username = %form.username, error = %e, "Account creation request failed");
            HTTPError::new(StatusCode::BAD_GATEWAY, e.to_string())
        })?;

    let status = backend.status();
    let content_type = backend.headers().get(header::CONTENT_TYPE).cloned();
    let body = backend
        .bytes()
        .await
        .map_err(|e| HTTPError::new(StatusCode::BAD_GATEWAY, e.to_string()))?;

    let mut response = (status, body).into_response();
    match content_type {
        Some(value) => {
            response.headers_mut().insert(header::CONTENT_TYPE, value);
        }
        None => {
            response.headers_mut().remove(header::CONTENT_TYPE);
        }
    }
    Ok(response)
}
