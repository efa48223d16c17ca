//! End-to-end ingestion pipeline
//!
//! Wires the stages together: crawl the site, extract documents, chunk and
//! summarize, then embed and load into the vector store. Each stage's error
//! converts into the crate [`Error`](crate::Error), so a failed run names the
//! stage and the offending URL or document id.

use tracing::{info, instrument};

use crate::crawler::{crawl_site, CrawlerConfig, Fetcher};
use crate::error::Result;
use crate::extractor::extract_documents;
use crate::loader::{load_documents, VectorStore};
use crate::model::{Client, CompletionModel, EmbeddingModel};
use crate::processor::{prepare_documents, ProcessorConfig};

/// Counts from a completed ingestion run
#[derive(Debug, Clone, Copy)]
pub struct IngestReport {
    /// Pages recorded during the crawl
    pub pages: usize,

    /// Documents extracted from those pages
    pub documents: usize,

    /// Embedding units loaded into the store
    pub embedded: usize,
}

/// Ingest one website into the vector store
#[instrument(skip(fetcher, client, store, crawler_config, processor_config))]
pub async fn ingest_site<F, C, E, S>(
    fetcher: &F,
    client: &Client<C, E>,
    store: &S,
    base_url: &str,
    crawler_config: &CrawlerConfig,
    processor_config: &ProcessorConfig,
) -> Result<IngestReport>
where
    F: Fetcher,
    C: CompletionModel,
    E: EmbeddingModel,
    S: VectorStore,
{
    let pages = crawl_site(fetcher, base_url, crawler_config).await?;
    info!("Pages found: {}", pages.len());

    let documents = extract_documents(base_url, &pages)?;
    info!("Documents extracted: {}", documents.len());

    let prepared = prepare_documents(client.completion(), &documents, processor_config).await?;
    info!("Prepared documents: {}", prepared.len());

    load_documents(client.embedding(), store, base_url, &prepared).await?;
    info!("Done");

    Ok(IngestReport {
        pages: pages.len(),
        documents: documents.len(),
        embedded: prepared.len(),
    })
}
