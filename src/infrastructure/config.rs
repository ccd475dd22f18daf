use serde::Deserialize;
use std::time::Duration;

use crate::application::dashboard_builder::DEFAULT_SERIES_PREFIX;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub influx: InfluxSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_listen")]
    pub listen: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InfluxSettings {
    #[serde(default = "default_influx_url")]
    pub url: String,
    #[serde(default = "default_influx_database")]
    pub database: String,
    #[serde(default = "default_influx_credential")]
    pub user: String,
    #[serde(default = "default_influx_credential")]
    pub password: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogSettings {
    /// File path or http(s) URL of the catalog
    #[serde(default = "default_catalog_source")]
    pub source: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    #[serde(default = "default_series_prefix")]
    pub series_prefix: String,
}

fn default_listen() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_influx_url() -> String {
    "http://localhost:8086".to_string()
}

fn default_influx_database() -> String {
    "graphite".to_string()
}

fn default_influx_credential() -> String {
    "root".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_catalog_source() -> String {
    "config/catalog.toml".to_string()
}

fn default_series_prefix() -> String {
    DEFAULT_SERIES_PREFIX.to_string()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl Default for InfluxSettings {
    fn default() -> Self {
        Self {
            url: default_influx_url(),
            database: default_influx_database(),
            user: default_influx_credential(),
            password: default_influx_credential(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            source: default_catalog_source(),
        }
    }
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            series_prefix: default_series_prefix(),
        }
    }
}

impl InfluxSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Load settings from `config/getdash.*` (optional), overridden by
/// `GETDASH__SECTION__KEY` environment variables.
pub fn load_settings() -> anyhow::Result<Settings> {
    load_settings_from("config/getdash")
}

pub fn load_settings_from(path: &str) -> anyhow::Result<Settings> {
    load_settings_with(path, environment())
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("GETDASH").separator("__")
}

/// Same layering as [`load_settings_from`], with the environment layer supplied by the caller
pub fn load_settings_with(path: &str, env: config::Environment) -> anyhow::Result<Settings> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(env)
        .build()?;

    Ok(settings.try_deserialize()?)
}
