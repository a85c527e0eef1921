//! Core configuration types and utilities.
use crate::{DEFAULT_LIST_LENGTH, VERISTAT_CONFIG};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fs;

lazy_static! {
    /// Lazy static reference to core configuration loaded from `veristat_config.toml`.
    pub static ref CORE_CONFIG: CoreConfig = parse_toml(
        &fs::read_to_string(std::env::var(VERISTAT_CONFIG).unwrap().as_str())
            .expect("Error reading veristat_config.toml")
    );
}

/// Parses and returns core configuration.
fn parse_toml(toml_str: &str) -> CoreConfig {
    toml::from_str::<Config>(toml_str)
        .expect("Error parsing veristat_config.toml")
        .core
}

/// Gets `veristat-core` configuration variables.
pub fn core_config() -> &'static CORE_CONFIG {
    &CORE_CONFIG
}

/// Configuration variables for the `veristat-core` crate.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct CoreConfig {
    /// Number of entries in a newly issued status list.
    pub default_list_length: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            default_list_length: DEFAULT_LIST_LENGTH,
        }
    }
}

/// Wrapper struct for parsing the `core` table.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug)]
struct Config {
    /// Core configuration data.
    core: CoreConfig,
}
