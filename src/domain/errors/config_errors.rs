use thiserror::Error as ThisError;

/// Errors raised while building a client from its configuration.
///
/// These are the only errors the crate returns to callers; they are fatal to
/// construction and there is nothing to recover.
#[derive(ThisError, Debug)]
pub enum ConfigError {
    #[error("{0} not exists in config")]
    MissingField(&'static str),

    #[error("Invalid config field '{field}': {message}")]
    InvalidField { field: String, message: String },

    #[error("Invalid client argument '{key}': {message}")]
    InvalidArgs { key: String, message: String },

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
