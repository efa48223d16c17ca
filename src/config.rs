//! Environment-driven configuration
//!
//! Collects every knob the pipeline reads from the environment in one place.
//! Missing variables fall back to defaults; endpoint credentials default to
//! empty strings and are only required when the `ingest` path is run.

/// Runtime settings sourced from environment variables
#[derive(Debug, Clone)]
pub struct Settings {
    /// Chunk size in characters; also the splitting threshold
    pub chunk_size: usize,

    /// Maximum number of pages recorded during a crawl
    pub page_limit: usize,

    /// Azure OpenAI endpoint for embeddings
    pub openai_endpoint: String,

    /// Azure OpenAI API key
    pub openai_key: String,

    /// Azure OpenAI API version
    pub openai_api_version: String,

    /// Embeddings deployment name
    pub embeddings_deployment: String,

    /// Serverless chat-completions endpoint for summarization
    pub completion_endpoint: String,

    /// API key for the chat-completions endpoint
    pub completion_key: String,

    /// Base URL of the vector store
    pub chroma_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chunk_size: 3000,
            page_limit: 20,
            openai_endpoint: String::new(),
            openai_key: String::new(),
            openai_api_version: String::new(),
            embeddings_deployment: String::new(),
            completion_endpoint: String::new(),
            completion_key: String::new(),
            chroma_url: "http://localhost:8000".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the environment, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            chunk_size: env_parse("CHUNK_SIZE", defaults.chunk_size),
            page_limit: env_parse("PROCESS_PAGES_LIMIT", defaults.page_limit),
            openai_endpoint: env_or("AZURE_OPENAI_ENDPOINT", defaults.openai_endpoint),
            openai_key: env_or("AZURE_OPENAI_API_KEY", defaults.openai_key),
            openai_api_version: env_or("OPENAI_API_VERSION", defaults.openai_api_version),
            embeddings_deployment: env_or(
                "EMBEDDINGS_DEPLOYMENT_NAME",
                defaults.embeddings_deployment,
            ),
            completion_endpoint: env_or("AZURE_MISTRAL_ENDPOINT", defaults.completion_endpoint),
            completion_key: env_or("AZURE_MISTRAL_API_KEY", defaults.completion_key),
            chroma_url: env_or("CHROMA_URL", defaults.chroma_url),
        }
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.chunk_size, 3000);
        assert_eq!(settings.page_limit, 20);
        assert_eq!(settings.chroma_url, "http://localhost:8000");
        assert!(settings.openai_endpoint.is_empty());
    }
}
