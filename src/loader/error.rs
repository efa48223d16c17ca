//! Error types for the loader module

use crate::error::Error as CrateError;
use crate::model::ModelError;
use thiserror::Error;

/// Error type for vector store and loading operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Store returned an error response
    #[error("store error: {status_code} - {message}")]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },

    /// Metadata serialization error
    #[error("metadata serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The embedding collaborator failed
    #[error("embedding error: {0}")]
    Embedding(#[from] ModelError),

    /// The embedding collaborator returned the wrong number of vectors
    #[error("requested {expected} embeddings, got {actual}")]
    EmbeddingCount {
        /// Number of texts sent
        expected: usize,
        /// Number of vectors returned
        actual: usize,
    },

    /// The site URL could not be parsed for a collection name
    #[error("invalid site URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The site URL has no host to name a collection after
    #[error("site URL has no host: {0}")]
    MissingHost(String),
}

impl From<StoreError> for CrateError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Http(e) => CrateError::Http(e),
            _ => CrateError::Store(err.to_string()),
        }
    }
}
