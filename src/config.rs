use crate::common::constants::{
    ADVENTURE_PACKAGES_PATH, DEFAULT_API_BASE_URL, DEFAULT_SERVER_PORT, DEFAULT_TIMEOUT_SECONDS,
    DESTINATIONS_PATH, FIXED_DEPARTURES_PATH, HOLIDAY_TYPES_PATH, PACKAGES_PATH,
};
use crate::common::error::{Result, WishlistError};
use crate::common::types::SourceTag;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

const CONFIG_PATH_ENV: &str = "WISHLIST_CONFIG";
const BASE_URL_ENV: &str = "WISHLIST_API_BASE_URL";
const TIMEOUT_ENV: &str = "WISHLIST_HTTP_TIMEOUT_SECONDS";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Base for root-relative image paths; falls back to `base_url`
    #[serde(default)]
    pub media_base_url: Option<String>,
    #[serde(default)]
    pub endpoints: EndpointConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EndpointConfig {
    #[serde(default = "default_packages")]
    pub packages: String,
    #[serde(default = "default_holiday_types")]
    pub holiday_types: String,
    #[serde(default = "default_destinations")]
    pub destinations: String,
    #[serde(default = "default_fixed_departures")]
    pub fixed_departures: String,
    #[serde(default = "default_adventure_packages")]
    pub adventure_packages: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}
fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}
fn default_packages() -> String {
    PACKAGES_PATH.to_string()
}
fn default_holiday_types() -> String {
    HOLIDAY_TYPES_PATH.to_string()
}
fn default_destinations() -> String {
    DESTINATIONS_PATH.to_string()
}
fn default_fixed_departures() -> String {
    FIXED_DEPARTURES_PATH.to_string()
}
fn default_adventure_packages() -> String {
    ADVENTURE_PACKAGES_PATH.to_string()
}
fn default_port() -> u16 {
    DEFAULT_SERVER_PORT
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            media_base_url: None,
            endpoints: EndpointConfig::default(),
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            packages: default_packages(),
            holiday_types: default_holiday_types(),
            destinations: default_destinations(),
            fixed_departures: default_fixed_departures(),
            adventure_packages: default_adventure_packages(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: default_port() }
    }
}

impl Config {
    /// Load `config.toml` (or `$WISHLIST_CONFIG`), then apply environment overrides.
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let config_path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config.toml".to_string());
        let mut config = if Path::new(&config_path).exists() {
            Self::load_from_path(&config_path)?
        } else {
            debug!(path = %config_path, "No config file found, using defaults");
            Self::default()
        };

        config.apply_env_overrides()?;
        info!(base_url = %config.api.base_url, "Configuration loaded");
        Ok(config)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            WishlistError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            self.api.base_url = base_url;
        }
        if let Ok(timeout) = std::env::var(TIMEOUT_ENV) {
            self.api.timeout_seconds = timeout.parse().map_err(|_| {
                WishlistError::Config(format!("{} must be a whole number of seconds", TIMEOUT_ENV))
            })?;
        }
        self.validate()
    }

    fn validate(&self) -> Result<()> {
        let base = self.api.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(WishlistError::Config(format!(
                "api.base_url must be an http(s) URL, got '{}'",
                self.api.base_url
            )));
        }
        if self.api.timeout_seconds == 0 {
            return Err(WishlistError::Config(
                "api.timeout_seconds must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl ApiConfig {
    /// Absolute URL for one catalog source
    pub fn endpoint_url(&self, source: SourceTag) -> String {
        let path = match source {
            SourceTag::Package => &self.endpoints.packages,
            SourceTag::Holiday => &self.endpoints.holiday_types,
            SourceTag::Destination => &self.endpoints.destinations,
            SourceTag::FixedDeparture => &self.endpoints.fixed_departures,
            SourceTag::Adventure => &self.endpoints.adventure_packages,
        };
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.clone();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn media_base(&self) -> &str {
        self.media_base_url.as_deref().unwrap_or(&self.base_url)
    }
}
