// src/errors.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NexaError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Conversation error: {0}")]
    Store(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type NexaResult<T> = Result<T, NexaError>;

impl NexaError {
    pub fn api_error(msg: impl Into<String>) -> Self {
        NexaError::Api(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        NexaError::Config(msg.into())
    }

    pub fn store_error(msg: impl Into<String>) -> Self {
        NexaError::Store(msg.into())
    }

    pub fn clipboard_error(msg: impl Into<String>) -> Self {
        NexaError::Clipboard(msg.into())
    }
}
