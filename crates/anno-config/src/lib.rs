//! # anno-config
//!
//! Layered configuration loading for the `anno` toolkit using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ANNO_*` prefix, `__` as separator)
//! 2. Project-level `.anno/config.toml`
//! 3. User-level `~/.config/anno/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ANNO_GENERAL__PRETTY` -> `general.pretty` and
//! `ANNO_GENERAL__DEFAULT_ENTITY` -> `general.default_entity`.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use anno_config::AnnoConfig;
//!
//! let config = AnnoConfig::load_with_dotenv().expect("config");
//! if config.general.pretty {
//!     println!("default entity: {}", config.general.default_entity);
//! }
//! ```

mod error;
mod general;

pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix for every config key.
pub const ENV_PREFIX: &str = "ANNO_";

/// Project-local config file, relative to the working directory.
pub const LOCAL_CONFIG_PATH: &str = ".anno/config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnnoConfig {
    #[serde(default)]
    pub general: GeneralConfig,
}

impl AnnoConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`. Use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration after reading a `.env` file from the current
    /// directory, if one exists.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        // A missing .env is the common case.
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("anno").join("config.toml"))
    }
}
