use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How the session cookie is named and how its token is checked.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct SessionConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Sets the `Secure` attribute on the session cookie.
    #[serde(default)]
    pub secure_cookie: bool,
    #[serde(default)]
    pub verifier: VerifierConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            secure_cookie: false,
            verifier: VerifierConfig::default(),
        }
    }
}

fn default_cookie_name() -> String {
    "session_token".to_string()
}

/// Token verifier backends, selected with a "type" tag in the YAML.
#[derive(Deserialize, Serialize, Debug, Clone, Default, JsonSchema)]
#[serde(tag = "type")]
pub enum VerifierConfig {
    /// Any non-empty token counts as logged in.
    #[serde(rename = "local")]
    #[default]
    Local,
    /// Tokens are checked against the backend's `/profile` endpoint.
    #[serde(rename = "remote")]
    Remote(RemoteVerifierConfig),
}

#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct RemoteVerifierConfig {
    /// Seconds a verification result is reused. 0 disables caching.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_seconds: u64,
}

fn default_cache_ttl() -> u64 {
    30
}
