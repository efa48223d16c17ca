//! # Collaborator Model Module
//!
//! This module defines the two opaque collaborators the pipeline talks to:
//! a text-completion service used for summarization and an embedding service
//! used at load time, plus a unified [`Client`] pairing them.
//!
//! ## Key Components
//!
//! - `CompletionModel`: system-instruction + prompt in, text out
//! - `EmbeddingModel`: ordered texts in, one vector per text out
//! - `Client`: wraps one of each so the pipeline takes a single handle
//! - `AzureChatCompletion` / `AzureEmbedding`: reqwest-backed implementations
//! - `MockCompletionModel` / `MockEmbeddingModel`: scripted test doubles

mod azure;
mod error;
pub mod mock;

pub use azure::{AzureChatCompletion, AzureEmbedding};
pub use error::ModelError;

/// A text-completion collaborator
pub trait CompletionModel {
    /// Run a completion with a system instruction and a user prompt
    fn complete(
        &self,
        system: &str,
        prompt: &str,
    ) -> impl Future<Output = Result<String, ModelError>> + Send;
}

/// An embedding collaborator; output order matches input order
pub trait EmbeddingModel {
    /// Embed a batch of texts, returning one vector per input text
    fn embed_texts(
        &self,
        texts: &[String],
    ) -> impl Future<Output = Result<Vec<Vec<f32>>, ModelError>> + Send;
}

/// A unified client pairing a completion model with an embedding model
#[derive(Debug, Clone)]
pub struct Client<C, E>
where
    C: CompletionModel,
    E: EmbeddingModel,
{
    completion_model: C,
    embedding_model: E,
}

impl<C, E> Client<C, E>
where
    C: CompletionModel,
    E: EmbeddingModel,
{
    /// Pair a completion model with an embedding model
    pub fn new(completion_model: C, embedding_model: E) -> Self {
        Self {
            completion_model,
            embedding_model,
        }
    }

    /// The completion model
    pub fn completion(&self) -> &C {
        &self.completion_model
    }

    /// The embedding model
    pub fn embedding(&self) -> &E {
        &self.embedding_model
    }
}
