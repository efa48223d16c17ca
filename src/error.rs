//! Error types for the webingest crate

use thiserror::Error;

/// Result type for webingest operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for webingest operations
///
/// Each pipeline stage has its own error enum; this type wraps them so a
/// caller can tell which stage failed and for which URL or document.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Web crawling error
    #[error("Crawl error: {0}")]
    Crawl(String),

    /// Content extraction error
    #[error("Extract error: {0}")]
    Extract(String),

    /// Chunking or summarization error
    #[error("Process error: {0}")]
    Process(String),

    /// Completion or embedding collaborator error
    #[error("Model error: {0}")]
    Model(String),

    /// Vector store error
    #[error("Store error: {0}")]
    Store(String),
}
