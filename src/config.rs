//! Layered application configuration.
//!
//! Sources, later ones winning: built-in defaults, `config/default.toml`,
//! `config/<RUN_ENV>.toml`, then `MARKET__*` environment variables with `__` between
//! nested keys (`MARKET__DISCOVERY__DEFAULT_RADIUS_KM=25`). Both files are optional.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::Path;
use thiserror::Error;

const CONFIG_DIR: &str = "config";
const DEFAULT_ENV: &str = "development";

#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("Configuration loading failed: {0}")]
    Load(#[from] ConfigError),

    #[error("Configuration validation failed: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocationConfig {
    /// Upper bound on a single device position read.
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DiscoveryConfig {
    /// Read stored `(0,0)` coordinates as "no location".
    pub null_island_is_unset: bool,
    /// Radius applied when a discovery request names none.
    #[serde(default)]
    pub default_radius_km: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_json: bool,
    /// Channel capacity of every resource actor.
    pub actor_buffer: usize,
    /// Seed a few parties, addresses and materials at start-up.
    pub demo_seed: bool,
    pub location: LocationConfig,
    pub discovery: DiscoveryConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), AppConfigError> {
        if self.actor_buffer == 0 {
            return Err(AppConfigError::Validation(
                "actor_buffer must be at least 1".to_string(),
            ));
        }
        if self.location.request_timeout_ms == 0 {
            return Err(AppConfigError::Validation(
                "location.request_timeout_ms must be at least 1".to_string(),
            ));
        }
        if let Some(radius) = self.discovery.default_radius_km {
            if !radius.is_finite() || radius <= 0.0 {
                return Err(AppConfigError::Validation(format!(
                    "discovery.default_radius_km must be positive, got {radius}"
                )));
            }
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Loads from `./config`, with the profile picked by `RUN_ENV`.
pub fn load_config() -> Result<AppConfig, AppConfigError> {
    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| DEFAULT_ENV.to_string());
    load_config_from(Path::new(CONFIG_DIR), &run_env)
}

pub fn load_config_from(dir: &Path, run_env: &str) -> Result<AppConfig, AppConfigError> {
    let default_file = dir.join("default");
    let env_file = dir.join(run_env);

    let config = Config::builder()
        .set_default("host", "127.0.0.1")?
        .set_default("port", 8080)?
        .set_default("log_level", "info")?
        .set_default("log_json", false)?
        .set_default("actor_buffer", 32)?
        .set_default("demo_seed", false)?
        .set_default("location.request_timeout_ms", 10_000)?
        .set_default("discovery.null_island_is_unset", true)?
        .add_source(File::with_name(&default_file.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_file.to_string_lossy()).required(false))
        .add_source(
            Environment::with_prefix("MARKET")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;
    app_config.validate()?;
    Ok(app_config)
}
