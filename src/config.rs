use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Public TheMealDB endpoint using the shared test key
pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Longest drawer animation phase accepted from configuration
pub const MAX_DRAWER_MS: u64 = 10_000;

/// Browser configuration
#[derive(Debug, Deserialize, Clone)]
pub struct BrowserConfig {
    /// Base URL of the recipe service, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Duration of each drawer animation phase in milliseconds
    #[serde(default = "default_drawer_ms")]
    pub drawer_ms: u64,
    /// Ingredient searched on startup
    #[serde(default = "default_term")]
    pub default_term: String,
    /// Category selected on startup
    #[serde(default = "default_category")]
    pub default_category: String,
    /// Area selected on startup
    #[serde(default = "default_area")]
    pub default_area: String,
    /// Frame width in columns
    #[serde(default = "default_width")]
    pub width: usize,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            drawer_ms: default_drawer_ms(),
            default_term: default_term(),
            default_category: default_category(),
            default_area: default_area(),
            width: default_width(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_drawer_ms() -> u64 {
    700
}

fn default_term() -> String {
    "flour".to_string()
}

fn default_category() -> String {
    "Beef".to_string()
}

fn default_area() -> String {
    "Italian".to_string()
}

fn default_width() -> usize {
    100
}

impl BrowserConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with CHEFORA__ prefix
    /// 2. chefora.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: CHEFORA__DRAWER_MS
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("chefora").required(false))
            .add_source(
                Environment::with_prefix("CHEFORA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Capped at [`MAX_DRAWER_MS`]
    pub fn drawer_delay(&self) -> Duration {
        Duration::from_millis(self.drawer_ms.min(MAX_DRAWER_MS))
    }
}
