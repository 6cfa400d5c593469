use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

use crate::namespaces::Namespaces;

/// Application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Recipe document to load at startup
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
    /// Namespace prefix bindings; `rcp` must be bound
    #[serde(default)]
    pub namespaces: Namespaces,
    /// Width of the longest bar in text charts
    #[serde(default = "default_chart_width")]
    pub chart_width: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            namespaces: Namespaces::default(),
            chart_width: default_chart_width(),
        }
    }
}

// Default value functions
fn default_data_path() -> PathBuf {
    PathBuf::from("data/recipes.xml")
}

fn default_chart_width() -> usize {
    40
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPEBOOK__ prefix
    /// 2. recipebook.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPEBOOK__DATA_PATH
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`AppConfig::load`] for the layering order.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipebook").required(false))
        // Use double underscore for nested: RECIPEBOOK__NAMESPACES__RCP
        .add_source(
            Environment::with_prefix("RECIPEBOOK")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
