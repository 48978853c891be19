use axum::http::HeaderValue;

use crate::config::{GateConfig, RedirectPolicy};

/// Validates the `redirect` target the login view forwards to after a
/// successful login.
#[derive(Debug, Clone)]
pub struct RedirectSanitizer {
    policy: RedirectPolicy,
    fallback: String,
}

impl RedirectSanitizer {
    pub fn new(policy: RedirectPolicy, fallback: impl Into<String>) -> Self {
        Self {
            policy,
            fallback: fallback.into(),
        }
    }

    pub fn from_config(config: &GateConfig) -> Self {
        Self::new(config.redirect_policy, config.default_redirect.clone())
    }

    /// The target to forward to: `requested` if the policy accepts it,
    /// otherwise the configured fallback.
    pub fn sanitize<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        match requested {
            Some(target) if !target.is_empty() && self.accepts(target) => target,
            _ => &self.fallback,
        }
    }

    fn accepts(&self, target: &str) -> bool {
        // The target becomes a Location header value.
        if target.chars().any(char::is_control) || HeaderValue::from_str(target).is_err() {
            return false;
        }
        match self.policy {
            RedirectPolicy::Any => true,
            RedirectPolicy::RelativeOnly => is_same_origin_path(target),
        }
    }
}

/// An absolute path on this origin: starts with a single `/` and contains no
/// backslash a browser could normalize into a scheme-relative URL.
fn is_same_origin_path(target: &str) -> bool {
    target.starts_with('/') && !target.starts_with("//") && !target.contains('\\')
}
