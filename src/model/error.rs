//! Error types for the model module

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for completion and embedding calls
#[derive(Debug, Error)]
pub enum ModelError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error: {status_code} - {message}")]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },

    /// Unexpected response format
    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),

    /// Client was constructed with incomplete credentials
    #[error("Model configuration error: {0}")]
    Config(String),
}

impl From<ModelError> for CrateError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Http(e) => CrateError::Http(e),
            _ => CrateError::Model(err.to_string()),
        }
    }
}
