//! CLI settings.
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `config.toml` in the platform config dir, then `SCHOOLADMIN_*` environment
//! variables.

use std::time::Duration;

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use config::builder::DefaultState;
use schooladmin_lib::DEFAULT_API_PREFIX;
use schooladmin_lib::session::Role;
use schooladmin_lib::session::Session;
use serde::Deserialize;
use simplelog::LevelFilter;

use crate::paths;

const ENV_PREFIX: &str = "SCHOOLADMIN";
const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to load settings: {0}")]
    Load(#[from] ConfigError),

    #[error("invalid log level '{0}'")]
    LogLevel(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Backend base URL.
    pub api_url: String,
    pub api_prefix: String,
    /// Role the pages are shown for.
    pub role: Role,
    pub timeout_secs: u64,
    pub log_level: String,
}

impl Settings {
    /// Loads defaults, the config file, and the environment, in that order.
    pub fn load() -> Result<Self, SettingsError> {
        let mut builder = defaults()?;
        if let Some(path) = paths::config_file() {
            builder = builder.add_source(File::from(path).required(false));
        }
        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn session(&self) -> Session {
        Session::new(self.role)
    }

    pub fn level_filter(&self) -> Result<LevelFilter, SettingsError> {
        self.log_level
            .parse()
            .map_err(|_| SettingsError::LogLevel(self.log_level.clone()))
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("api_url", DEFAULT_API_URL)?
        .set_default("api_prefix", DEFAULT_API_PREFIX)?
        .set_default("role", Role::Admin.as_str())?
        .set_default("timeout_secs", 30_i64)?
        .set_default("log_level", "info")
}
