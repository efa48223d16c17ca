//! Chroma-compatible vector store client
//!
//! A thin reqwest client for the Chroma collections REST API, implementing
//! the [`VectorStore`] trait the batch loader runs against.

use std::time::Duration;

use reqwest::{Client as ReqwestClient, StatusCode};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::loader::error::StoreError;
use crate::loader::{Collection, EmbeddingBatch, VectorStore};

/// Default timeout for store requests in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// HTTP client for a Chroma-compatible vector store
#[derive(Debug, Clone)]
pub struct ChromaStore {
    client: ReqwestClient,
    base_url: String,
}

impl ChromaStore {
    /// Build a client for the store at the given base URL
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn collections_url(&self) -> String {
        format!("{}/api/v1/collections", self.base_url)
    }
}

impl VectorStore for ChromaStore {
    #[instrument(skip(self))]
    async fn get_collection(&self, name: &str) -> Result<Option<Collection>, StoreError> {
        let url = format!("{}/{}", self.collections_url(), name);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status_code: status.as_u16(),
                message,
            });
        }
        Ok(Some(response.json().await?))
    }

    #[instrument(skip(self))]
    async fn delete_collection(&self, name: &str) -> Result<(), StoreError> {
        let url = format!("{}/{}", self.collections_url(), name);
        let response = self.client.delete(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status_code: status.as_u16(),
                message,
            });
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_or_create_collection(&self, name: &str) -> Result<Collection, StoreError> {
        let body = CreateCollectionRequest {
            name,
            get_or_create: true,
        };
        let response = self
            .client
            .post(self.collections_url())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status_code: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }

    #[instrument(skip(self, batch), fields(count = batch.ids.len()))]
    async fn upsert(&self, collection: &Collection, batch: &EmbeddingBatch) -> Result<(), StoreError> {
        let url = format!("{}/{}/upsert", self.collections_url(), collection.id);
        debug!("Upserting {} documents", batch.ids.len());
        let response = self.client.post(&url).json(batch).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status_code: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct CreateCollectionRequest<'a> {
    name: &'a str,
    get_or_create: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use serde_json::json;

    fn batch() -> EmbeddingBatch {
        EmbeddingBatch {
            documents: vec!["text".to_string()],
            embeddings: vec![vec![0.5, 0.25]],
            metadatas: vec![json!({"documentId": "root"})],
            ids: vec!["root".to_string()],
        }
    }

    #[tokio::test]
    async fn test_get_collection_found() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/collections/site-knowledge")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{\"id\": \"c1\", \"name\": \"site-knowledge\"}")
            .create_async()
            .await;

        let store = ChromaStore::new(&server.url()).unwrap();
        let collection = store.get_collection("site-knowledge").await.unwrap();
        assert_eq!(collection.unwrap().id, "c1");
    }

    #[tokio::test]
    async fn test_get_collection_missing() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/collections/missing")
            .with_status(404)
            .create_async()
            .await;

        let store = ChromaStore::new(&server.url()).unwrap();
        assert!(store.get_collection("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_collection_error_surfaces() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("DELETE", "/api/v1/collections/site-knowledge")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let store = ChromaStore::new(&server.url()).unwrap();
        let result = store.delete_collection("site-knowledge").await;
        assert!(matches!(
            result,
            Err(StoreError::Api {
                status_code: 500,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_get_or_create_collection() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/collections")
            .match_body(mockito::Matcher::Json(json!({
                "name": "site-knowledge",
                "get_or_create": true
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{\"id\": \"c2\", \"name\": \"site-knowledge\"}")
            .expect(1)
            .create_async()
            .await;

        let store = ChromaStore::new(&server.url()).unwrap();
        let collection = store.get_or_create_collection("site-knowledge").await.unwrap();
        assert_eq!(collection.id, "c2");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_upsert_posts_batch_to_collection() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/collections/c2/upsert")
            .match_body(mockito::Matcher::Json(json!({
                "documents": ["text"],
                "embeddings": [[0.5, 0.25]],
                "metadatas": [{"documentId": "root"}],
                "ids": ["root"]
            })))
            .with_status(200)
            .expect(1)
            .create_async()
            .await;

        let store = ChromaStore::new(&server.url()).unwrap();
        let collection = Collection {
            id: "c2".to_string(),
            name: "site-knowledge".to_string(),
        };
        store.upsert(&collection, &batch()).await.unwrap();

        mock.assert_async().await;
    }
}
