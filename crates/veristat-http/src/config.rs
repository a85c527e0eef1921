//! Veristat HTTP configuration types and utilities.
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fs;
use veristat_core::VERISTAT_CONFIG;

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// HTTP configuration for the document loader.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HTTPConfig {
    /// Request timeout in seconds for status list credential fetches.
    pub timeout_seconds: u64,
    /// Optional user agent header sent with fetches.
    pub user_agent: Option<String>,
}

impl std::fmt::Display for HTTPConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl Default for HTTPConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: None,
        }
    }
}

lazy_static! {
    /// Lazy static reference to HTTP configuration loaded from `veristat_config.toml`.
    pub static ref HTTP_CONFIG: HTTPConfig = parse_toml(
        &fs::read_to_string(std::env::var(VERISTAT_CONFIG).unwrap().as_str())
            .expect("Error reading veristat_config.toml")
    );
}

/// Parses and returns HTTP configuration.
fn parse_toml(toml_str: &str) -> HTTPConfig {
    toml::from_str::<Config>(toml_str)
        .expect("Error parsing veristat_config.toml")
        .http
}

/// Gets `veristat-http` configuration variables.
pub fn http_config() -> &'static HTTP_CONFIG {
    &HTTP_CONFIG
}

/// Wrapper struct for parsing the `http` config table.
#[derive(Serialize, Deserialize, Debug, Clone)]
struct Config {
    /// HTTP configuration data.
    http: HTTPConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize() {
        let config_string = r#"
        [http]
        timeout_seconds = 10
        user_agent = "veristat/0.1.0"

        [non_http]
        key = "value"
        "#;

        let config: HTTPConfig = parse_toml(config_string);
        assert_eq!(
            config,
            HTTPConfig {
                timeout_seconds: 10,
                user_agent: Some("veristat/0.1.0".to_string()),
            }
        );
    }
}
