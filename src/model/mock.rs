//! # Mock Collaborator Models for Testing
//!
//! Scripted implementations of [`CompletionModel`] and [`EmbeddingModel`]
//! for use in tests. The completion mock returns queued responses and records
//! every request it sees, so tests can assert on prompt sequencing; the
//! embedding mock returns fixed-dimension vectors and records batch sizes.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::model::error::ModelError;
use crate::model::{CompletionModel, EmbeddingModel};

/// A recorded completion request
#[derive(Debug, Clone)]
pub struct RecordedCompletion {
    /// The system instruction passed to the model
    pub system: String,

    /// The user prompt passed to the model
    pub prompt: String,
}

/// A mock completion model returning scripted responses
#[derive(Debug, Clone, Default)]
pub struct MockCompletionModel {
    responses: Arc<Mutex<Vec<String>>>,
    requests: Arc<Mutex<Vec<RecordedCompletion>>>,
}

impl MockCompletionModel {
    /// Create a mock with no scripted responses; calls echo a fixed marker
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response; queued responses are returned first-in first-out
    pub async fn push_response(&self, text: &str) {
        self.responses.lock().await.push(text.to_string());
    }

    /// All requests seen so far, in call order
    pub async fn requests(&self) -> Vec<RecordedCompletion> {
        self.requests.lock().await.clone()
    }
}

impl CompletionModel for MockCompletionModel {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, ModelError> {
        self.requests.lock().await.push(RecordedCompletion {
            system: system.to_string(),
            prompt: prompt.to_string(),
        });

        let mut responses = self.responses.lock().await;
        if responses.is_empty() {
            Ok("mock summary".to_string())
        } else {
            Ok(responses.remove(0))
        }
    }
}

/// A mock embedding model returning fixed-dimension vectors
#[derive(Debug, Clone)]
pub struct MockEmbeddingModel {
    dimensions: usize,
    batches: Arc<Mutex<Vec<usize>>>,
}

impl MockEmbeddingModel {
    /// Create a mock producing vectors of the given dimension
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            batches: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Sizes of the batches embedded so far, in call order
    pub async fn batch_sizes(&self) -> Vec<usize> {
        self.batches.lock().await.clone()
    }
}

impl EmbeddingModel for MockEmbeddingModel {
    async fn embed_texts(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ModelError> {
        self.batches.lock().await.push(texts.len());
        Ok(texts.iter().map(|_| vec![0.0; self.dimensions]).collect())
    }
}
