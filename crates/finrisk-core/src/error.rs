use thiserror::Error;

/// Top-level error type for the financial-risk explorer.
#[derive(Error, Debug)]
pub enum FinriskError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration value for {key}: {reason}")]
    InvalidSetting { key: String, reason: String },
}

pub type Result<T> = std::result::Result<T, FinriskError>;
