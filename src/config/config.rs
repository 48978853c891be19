use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::gate::GateConfig;
use super::logging::LoggingConfig;
use super::session::SessionConfig;

/// Environment variable pointing at the YAML config file.
pub const CONFIG_PATH_ENV: &str = "RENTALS_WEB_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "./config.yaml";
const ENV_PREFIX: &str = "RENTALS_WEB_";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ConfigV1 {
    pub bind_address: String,
    pub backend: BackendConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub gate: GateConfig,
    #[serde(default)]
    pub maps: MapsConfig,
    pub logging: LoggingConfig,
}

/// Where the rentals backend lives.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct BackendConfig {
    /// Base URL without trailing slash, e.g. `http://localhost:8000`.
    pub base_url: String,
}

/// Google Maps loader settings for the app shell.
#[derive(Deserialize, Serialize, Debug, Clone, Default, JsonSchema)]
pub struct MapsConfig {
    pub api_key: Option<String>,
}

/// Build the figment used by `load_config`: the YAML file, then `RENTALS_WEB_*`
/// environment overrides (`__` separates nested keys).
pub fn figment(path: &str) -> Figment {
    Figment::new()
        .merge(Yaml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).ignore(&["CONFIG"]).split("__"))
}

/// Extract and unwrap the versioned config from a figment.
pub fn extract_config(figment: &Figment) -> Result<ConfigV1, figment::Error> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
}

/// Load config from the file named by `RENTALS_WEB_CONFIG` (default `./config.yaml`).
pub fn load_config() -> ConfigV1 {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    match extract_config(&figment(&path)) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading configuration from '{}': {}", path, e);
            std::process::exit(1);
        }
    }
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() -> Result<(), serde_json::Error> {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RedirectPolicy, SessionFailurePolicy, VerifierConfig};

    const MINIMAL: &str = r#"
version: "1.0.0"
bind_address: 127.0.0.1:8080
backend:
  base_url: http://localhost:8000
logging:
  level: info
  format: console
"#;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let cfg = extract_config(&Figment::new().merge(Yaml::string(MINIMAL))).unwrap();

        assert_eq!(cfg.bind_address, "127.0.0.1:8080");
        assert_eq!(cfg.backend.base_url, "http://localhost:8000");
        assert_eq!(cfg.session.cookie_name, "session_token");
        assert!(!cfg.session.secure_cookie);
        assert!(matches!(cfg.session.verifier, VerifierConfig::Local));
        assert_eq!(cfg.gate.on_session_error, SessionFailurePolicy::Propagate);
        assert_eq!(cfg.gate.redirect_policy, RedirectPolicy::RelativeOnly);
        assert_eq!(cfg.gate.default_redirect, "/dashboard");
        assert!(cfg.maps.api_key.is_none());
        assert_eq!(cfg.logging.service_name, "rentals-web");
    }

    #[test]
    fn test_full_config() {
        let yaml = r#"
version: "1.0.0"
bind_address: 0.0.0.0:3000
backend:
  base_url: https://rentals.example.com
session:
  cookie_name: sid
  secure_cookie: true
  verifier:
    type: remote
    cache_ttl_seconds: 5
gate:
  on_session_error: redirect
  redirect_policy: any
  default_redirect: /
maps:
  api_key: abc
logging:
  level: debug
  format: json
"#;
        let cfg = extract_config(&Figment::new().merge(Yaml::string(yaml))).unwrap();

        assert_eq!(cfg.session.cookie_name, "sid");
        assert!(cfg.session.secure_cookie);
        match cfg.session.verifier {
            VerifierConfig::Remote(remote) => assert_eq!(remote.cache_ttl_seconds, 5),
            other => panic!("unexpected verifier config: {:?}", other),
        }
        assert_eq!(cfg.gate.on_session_error, SessionFailurePolicy::Redirect);
        assert_eq!(cfg.gate.redirect_policy, RedirectPolicy::Any);
        assert_eq!(cfg.gate.default_redirect, "/");
        assert_eq!(cfg.maps.api_key.as_deref(), Some("abc"));
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let yaml = MINIMAL.replace("1.0.0", "9.9.9");
        let res = extract_config(&Figment::new().merge(Yaml::string(&yaml)));
        assert!(res.is_err());
    }

    #[test]
    fn test_missing_backend_is_rejected() {
        let yaml = r#"
version: "1.0.0"
bind_address: 127.0.0.1:8080
logging:
  level: info
  format: console
"#;
        let res = extract_config(&Figment::new().merge(Yaml::string(yaml)));
        assert!(res.is_err());
    }
}
