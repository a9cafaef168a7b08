//! Error types for blogfront

use std::time::Duration;

use thiserror::Error;

use crate::types::ServiceError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Upstream query error: {0}")]
    UpstreamQuery(ServiceError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream query timed out after {0:?}")]
    Timeout(Duration),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }

    /// Whether the error was produced by query-result classification and
    /// keeps its own status code at the HTTP boundary.
    pub fn is_classified(&self) -> bool {
        matches!(self, Error::UpstreamQuery(_) | Error::NotFound(_))
    }
}
