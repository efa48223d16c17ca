//! Embedding batch loader
//!
//! Takes the prepared embedding units for one site, obtains vectors from the
//! embedding collaborator in fixed-size batches, and upserts them into a
//! per-site collection in the vector store. Loading replaces any prior
//! collection for the site: the stale collection is deleted best-effort
//! before a fresh one is created.

mod chroma;
mod error;

pub use chroma::ChromaStore;
pub use error::StoreError;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use url::Url;

use crate::document::Document;
use crate::model::EmbeddingModel;

/// Number of documents embedded and upserted per batch
const BATCH_SIZE: usize = 10;

/// Suffix appended to the sanitized host to name a site's collection
const COLLECTION_SUFFIX: &str = "knowledge";

/// A named collection in the vector store
#[derive(Debug, Clone, Deserialize)]
pub struct Collection {
    /// Store-assigned collection id
    pub id: String,

    /// Collection name derived from the site
    pub name: String,
}

/// One batch of documents paired with vectors, metadata, and ids at upsert
#[derive(Debug, Clone, Serialize)]
pub struct EmbeddingBatch {
    /// Document texts
    pub documents: Vec<String>,

    /// One vector per document, in document order
    pub embeddings: Vec<Vec<f32>>,

    /// Serialized document metadata, in document order
    pub metadatas: Vec<serde_json::Value>,

    /// Unique document ids, in document order
    pub ids: Vec<String>,
}

/// A vector store holding one collection per ingested site
pub trait VectorStore {
    /// Look up a collection by name
    fn get_collection(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Collection>, StoreError>> + Send;

    /// Delete a collection by name
    fn delete_collection(&self, name: &str)
        -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Fetch or create a collection by name
    fn get_or_create_collection(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Collection, StoreError>> + Send;

    /// Upsert a batch of embedded documents into a collection
    fn upsert(
        &self,
        collection: &Collection,
        batch: &EmbeddingBatch,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Derive the collection name for a site
///
/// `https://example.com:8443` names the collection
/// `example-com-8443-knowledge`: host and port joined, with `.` and `:`
/// sanitized to `-` for the store's naming constraints.
pub fn collection_name(base_url: &str) -> Result<String, StoreError> {
    let parsed = Url::parse(base_url)?;
    let host = parsed
        .host_str()
        .ok_or_else(|| StoreError::MissingHost(base_url.to_string()))?;

    let mut site = host.to_string();
    if let Some(port) = parsed.port() {
        site.push(':');
        site.push_str(&port.to_string());
    }
    let sanitized = site.replace([':', '.'], "-");
    Ok(format!("{sanitized}-{COLLECTION_SUFFIX}"))
}

/// Embed prepared documents and upsert them into the site's collection
///
/// The site's existing collection, if any, is deleted first; a delete
/// failure is logged and ignored, while a create failure is fatal. Batches
/// are processed sequentially and a batch failure aborts the load.
#[instrument(skip(embedder, store, documents), fields(documents = documents.len()))]
pub async fn load_documents<E, S>(
    embedder: &E,
    store: &S,
    base_url: &str,
    documents: &[Document],
) -> Result<(), StoreError>
where
    E: EmbeddingModel,
    S: VectorStore,
{
    let name = collection_name(base_url)?;

    // idempotent replace: stale collection removal is best-effort
    match store.get_collection(&name).await {
        Ok(Some(existing)) => info!("Collection {} exists. Deleting...", existing.name),
        Ok(None) => info!("Collection {} not found", name),
        Err(e) => info!("Collection lookup failed: {}", e),
    }
    if let Err(e) = store.delete_collection(&name).await {
        info!("Collection delete skipped: {}", e);
    }

    let collection = store.get_or_create_collection(&name).await?;
    info!("Collection {} ready", collection.name);

    for batch_docs in documents.chunks(BATCH_SIZE) {
        let texts: Vec<String> = batch_docs.iter().map(|doc| doc.content.clone()).collect();
        let ids: Vec<String> = batch_docs
            .iter()
            .map(|doc| doc.metadata.document_id.clone())
            .collect();
        let metadatas = batch_docs
            .iter()
            .map(|doc| serde_json::to_value(&doc.metadata))
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Embedding {} documents", texts.len());
        let embeddings = embedder.embed_texts(&texts).await?;
        if embeddings.len() != texts.len() {
            return Err(StoreError::EmbeddingCount {
                expected: texts.len(),
                actual: embeddings.len(),
            });
        }

        let batch = EmbeddingBatch {
            documents: texts,
            embeddings,
            metadatas,
            ids,
        };
        store.upsert(&collection, &batch).await?;
        debug!("Upserted {} documents", batch.ids.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::model::mock::MockEmbeddingModel;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    /// In-memory store that records every call
    #[derive(Debug, Clone, Default)]
    struct RecordingStore {
        fail_delete: bool,
        deletes: Arc<Mutex<Vec<String>>>,
        creates: Arc<Mutex<Vec<String>>>,
        upserts: Arc<Mutex<Vec<EmbeddingBatch>>>,
    }

    impl VectorStore for RecordingStore {
        async fn get_collection(&self, _name: &str) -> Result<Option<Collection>, StoreError> {
            Ok(None)
        }

        async fn delete_collection(&self, name: &str) -> Result<(), StoreError> {
            self.deletes.lock().await.push(name.to_string());
            if self.fail_delete {
                return Err(StoreError::Api {
                    status_code: 404,
                    message: "collection not found".to_string(),
                });
            }
            Ok(())
        }

        async fn get_or_create_collection(&self, name: &str) -> Result<Collection, StoreError> {
            self.creates.lock().await.push(name.to_string());
            Ok(Collection {
                id: "c1".to_string(),
                name: name.to_string(),
            })
        }

        async fn upsert(
            &self,
            _collection: &Collection,
            batch: &EmbeddingBatch,
        ) -> Result<(), StoreError> {
            self.upserts.lock().await.push(batch.clone());
            Ok(())
        }
    }

    fn documents(count: usize) -> Vec<Document> {
        (0..count)
            .map(|i| {
                Document::new_page(
                    format!("content {i}"),
                    format!("/page{i}"),
                    format!("https://ex.com/page{i}"),
                    None,
                )
            })
            .collect()
    }

    #[test]
    fn test_collection_name_sanitizes_host_and_port() {
        assert_eq!(
            collection_name("https://example.com:8443").unwrap(),
            "example-com-8443-knowledge"
        );
        assert_eq!(
            collection_name("https://example.com/docs").unwrap(),
            "example-com-knowledge"
        );
    }

    #[test]
    fn test_collection_name_rejects_bad_urls() {
        assert!(collection_name("not a url").is_err());
        assert!(matches!(
            collection_name("data:text/plain,hello"),
            Err(StoreError::MissingHost(_))
        ));
    }

    #[tokio::test]
    async fn test_load_batches_of_ten() {
        let embedder = MockEmbeddingModel::new(3);
        let store = RecordingStore::default();

        load_documents(&embedder, &store, "https://ex.com", &documents(25))
            .await
            .unwrap();

        assert_eq!(embedder.batch_sizes().await, vec![10, 10, 5]);

        let upserts = store.upserts.lock().await;
        assert_eq!(upserts.len(), 3);
        assert_eq!(upserts[0].ids.len(), 10);
        assert_eq!(upserts[2].ids.len(), 5);
        assert_eq!(upserts[0].ids[0], "/page0");
        assert_eq!(upserts[0].metadatas[0]["documentId"], "/page0");
        assert_eq!(upserts[0].embeddings[0].len(), 3);
    }

    #[tokio::test]
    async fn test_load_replaces_existing_collection() {
        let embedder = MockEmbeddingModel::new(3);
        let store = RecordingStore::default();

        load_documents(&embedder, &store, "https://ex.com", &documents(1))
            .await
            .unwrap();

        assert_eq!(*store.deletes.lock().await, vec!["ex-com-knowledge"]);
        assert_eq!(*store.creates.lock().await, vec!["ex-com-knowledge"]);
    }

    #[tokio::test]
    async fn test_delete_failure_is_swallowed() {
        let embedder = MockEmbeddingModel::new(3);
        let store = RecordingStore {
            fail_delete: true,
            ..RecordingStore::default()
        };

        load_documents(&embedder, &store, "https://ex.com", &documents(2))
            .await
            .unwrap();

        assert_eq!(store.creates.lock().await.len(), 1);
        assert_eq!(store.upserts.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_documents_still_resets_collection() {
        let embedder = MockEmbeddingModel::new(3);
        let store = RecordingStore::default();

        load_documents(&embedder, &store, "https://ex.com", &[])
            .await
            .unwrap();

        assert_eq!(store.creates.lock().await.len(), 1);
        assert!(store.upserts.lock().await.is_empty());
        assert_eq!(embedder.batch_sizes().await, Vec::<usize>::new());
    }
}
