//! Error types for the processor module

use crate::error::Error as CrateError;
use crate::model::ModelError;
use thiserror::Error;

/// Error type for processor operations
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Summarization failed for a document
    #[error("summarization failed for document {document_id}: {source}")]
    Summarize {
        /// The id of the document being summarized
        document_id: String,
        /// The underlying collaborator error
        #[source]
        source: ModelError,
    },
}

impl From<ProcessError> for CrateError {
    fn from(err: ProcessError) -> Self {
        CrateError::Process(err.to_string())
    }
}
