use std::str::FromStr;

use anno_config::ConfigError;
use clap::ValueEnum;

/// Entity schemas selectable with `--entity`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum EntityArg {
    Annotation,
    Question,
    Corpus,
    Asset,
    AssetLink,
    Assignment,
    NewUser,
    User,
    FieldError,
    ValidationError,
    Configuration,
    Inserted,
    LoginRequest,
    LoginResponse,
}

impl EntityArg {
    /// Resolve `--entity`, falling back to the configured default.
    pub fn resolve(explicit: Option<Self>, configured: &str) -> Result<Self, ConfigError> {
        explicit.map_or_else(|| configured.parse(), Ok)
    }
}

impl FromStr for EntityArg {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(value, true).map_err(|_| ConfigError::InvalidValue {
            field: "general.default_entity".to_string(),
            reason: format!("unknown entity '{value}'"),
        })
    }
}
