use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Settings for the auth gate and the post-login redirect.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct GateConfig {
    #[serde(default)]
    pub on_session_error: SessionFailurePolicy,
    #[serde(default)]
    pub redirect_policy: RedirectPolicy,
    /// Where a successful login lands when no usable `redirect` was given.
    #[serde(default = "default_redirect")]
    pub default_redirect: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            on_session_error: SessionFailurePolicy::default(),
            redirect_policy: RedirectPolicy::default(),
            default_redirect: default_redirect(),
        }
    }
}

fn default_redirect() -> String {
    "/dashboard".to_string()
}

/// What the gate does when the session check itself fails.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SessionFailurePolicy {
    /// Surface the failure to the caller.
    #[default]
    Propagate,
    /// Treat the requester as logged out.
    Redirect,
    /// Let the navigation through.
    Allow,
}

/// Which `redirect` targets the login view may forward to.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum RedirectPolicy {
    /// Only same-origin absolute paths such as `/dashboard?x=1`.
    #[default]
    RelativeOnly,
    /// Forward to whatever was given.
    Any,
}
