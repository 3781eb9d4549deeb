use famfin_config::ConfigError;
use famfin_core::CoreError;
use famfin_domain::CalendarError;
use thiserror::Error;

/// Failures surfaced by the command line front end.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Calendar(#[from] CalendarError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn usage(message: impl Into<String>) -> Self {
        CliError::Usage(message.into())
    }
}
