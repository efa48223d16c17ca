//! Azure-hosted collaborator clients
//!
//! Two small reqwest clients: a serverless chat-completions endpoint used for
//! summarization and an Azure OpenAI deployment used for embeddings. Both are
//! plain request/response wrappers; rate limiting and retries are left to the
//! hosting service.

use std::time::Duration;

use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::model::error::ModelError;
use crate::model::{CompletionModel, EmbeddingModel};

/// Default timeout for collaborator requests in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Chat-completions client for a serverless Azure AI endpoint
#[derive(Debug, Clone)]
pub struct AzureChatCompletion {
    client: ReqwestClient,
    endpoint: String,
    api_key: String,
}

impl AzureChatCompletion {
    /// Build a client for the given endpoint and key
    pub fn new(endpoint: &str, api_key: &str) -> Result<Self, ModelError> {
        if endpoint.trim().is_empty() {
            return Err(ModelError::Config("missing completion endpoint".to_string()));
        }
        if api_key.trim().is_empty() {
            return Err(ModelError::Config("missing completion API key".to_string()));
        }
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }
}

impl CompletionModel for AzureChatCompletion {
    #[instrument(skip(self, system, prompt))]
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, ModelError> {
        let url = format!("{}/chat/completions", self.endpoint);
        let body = ChatRequest {
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        debug!("Sending completion request ({} prompt chars)", prompt.len());
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ModelError::Api {
                status_code: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ModelError::UnexpectedResponse("no choices in response".to_string()))?;
        Ok(choice.message.content)
    }
}

/// Embeddings client for an Azure OpenAI deployment
#[derive(Debug, Clone)]
pub struct AzureEmbedding {
    client: ReqwestClient,
    endpoint: String,
    api_key: String,
    deployment: String,
    api_version: String,
}

impl AzureEmbedding {
    /// Build a client for the given deployment
    pub fn new(
        endpoint: &str,
        api_key: &str,
        deployment: &str,
        api_version: &str,
    ) -> Result<Self, ModelError> {
        if endpoint.trim().is_empty() {
            return Err(ModelError::Config("missing embeddings endpoint".to_string()));
        }
        if api_key.trim().is_empty() {
            return Err(ModelError::Config("missing embeddings API key".to_string()));
        }
        if deployment.trim().is_empty() {
            return Err(ModelError::Config("missing embeddings deployment".to_string()));
        }
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            deployment: deployment.to_string(),
            api_version: api_version.to_string(),
        })
    }
}

impl EmbeddingModel for AzureEmbedding {
    #[instrument(skip(self, texts), fields(count = texts.len()))]
    async fn embed_texts(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ModelError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!(
            "{}/openai/deployments/{}/embeddings",
            self.endpoint, self.deployment
        );
        let body = EmbeddingRequest { input: texts };

        debug!("Embedding {} texts", texts.len());
        let response = self
            .client
            .post(&url)
            .query(&[("api-version", &self.api_version)])
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ModelError::Api {
                status_code: status.as_u16(),
                message,
            });
        }

        let mut parsed: EmbeddingResponse = response.json().await?;
        if parsed.data.len() != texts.len() {
            return Err(ModelError::UnexpectedResponse(format!(
                "requested {} embeddings, got {}",
                texts.len(),
                parsed.data.len()
            )));
        }
        parsed.data.sort_by_key(|entry| entry.index);
        Ok(parsed.data.into_iter().map(|entry| entry.embedding).collect())
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}
