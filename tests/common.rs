#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, Response};
use axum::Router;
use figment::{
    providers::{Format, Yaml},
    Figment,
};
use rentals_web::config::{extract_config, ConfigV1};
use rentals_web::routes::create_router;
use rentals_web::state::AppState;

/// Config with the local verifier; the backend is never reached.
pub const LOCAL_CONFIG: &str = r#"
version: "1.0.0"
bind_address: 127.0.0.1:8090
backend:
  base_url: http://127.0.0.1:9
logging:
  level: "debug"
  format: "json"
"#;

/// Config with the remote verifier pointed at `backend_url`.
pub fn remote_config(backend_url: &str) -> String {
    format!(
        r#"
version: "1.0.0"
bind_address: 127.0.0.1:8090
backend:
  base_url: {}
session:
  verifier:
    type: remote
    cache_ttl_seconds: 0
logging:
  level: "debug"
  format: "json"
"#,
        backend_url
    )
}

pub fn load_config(yaml: &str) -> ConfigV1 {
    extract_config(&Figment::new().merge(Yaml::string(yaml)))
        .expect("Failed to parse test config YAML")
}

pub fn build_app(config: ConfigV1) -> Router {
    create_router(AppState::new(Arc::new(config)))
}

pub fn get(path: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("failed to build request")
}

pub fn post_form(path: &str, form: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .expect("failed to build request")
}

pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("missing Location header")
        .to_str()
        .expect("Location is not ASCII")
        .to_string()
}

pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    String::from_utf8(bytes.to_vec()).expect("body is not UTF-8")
}
