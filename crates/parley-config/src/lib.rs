//! # parley-config
//!
//! Layered configuration loading for Parley using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PARLEY_*` prefix, `__` as separator)
//! 2. Project-level `.parley/config.toml`
//! 3. User-level `~/.config/parley/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `PARLEY_BUDGET__DAILY_TOKEN_LIMIT` -> `budget.daily_token_limit`,
//! `PARLEY_DATABASE__PATH` -> `database.path`, etc. The `__` (double
//! underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use parley_config::ParleyConfig;
//!
//! // Load from all sources (dotenvy + TOML + env):
//! let config = ParleyConfig::load_with_dotenv().expect("config");
//!
//! // Or without dotenvy (env vars must already be set):
//! let config = ParleyConfig::load().expect("config");
//!
//! println!("daily limit: {}", config.budget.daily_token_limit);
//! ```

mod budget;
mod database;
mod error;
mod llm;

pub use budget::BudgetConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use llm::LlmConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ParleyConfig {
    #[serde(default)]
    pub budget: BudgetConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

impl ParleyConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// Precedence (highest to lowest):
    /// 1. Environment variables (`PARLEY_*` prefix)
    /// 2. `.parley/config.toml` (project-local)
    /// 3. `~/.config/parley/config.toml` (user-global)
    /// 4. Default values
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any layer fails to parse or extract.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` before building the figment. This is the typical
    /// entry point for servers and tests.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any layer fails to parse or extract.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add additional
    /// providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".parley/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("PARLEY_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("parley").join("config.toml"))
    }
}
