use thiserror::Error;

use crate::config::ConfigError;

/// The only error shape a screen ever shows.
///
/// Transport failures and API failures are folded into a code and a message
/// and are not told apart any further. Renders as `[{code}] {message}`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("[{code}] {message}")]
pub struct FetchError {
    pub code: String,
    pub message: String,
}

impl FetchError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum WappError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Invalid route: {0}")]
    InvalidRoute(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, WappError>;
