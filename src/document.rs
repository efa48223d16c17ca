//! Document types shared across the ingestion pipeline
//!
//! A [`Document`] is the unit of work from extraction onward: one per crawled
//! page, one per chunk, and at most one summary per chunked page. Metadata
//! serializes with the field names the vector store expects.

use serde::{Deserialize, Serialize};

/// A unit of text with provenance metadata, ready for chunking or embedding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// The text content of the document
    pub content: String,

    /// Identity and provenance metadata
    pub metadata: DocumentMetadata,
}

/// Metadata identifying a document and describing its role in the pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Unique id within the site's collection. Chunks append `-chunk<index>`,
    /// summaries append `-summary` to the page's id.
    #[serde(rename = "documentId")]
    pub document_id: String,

    /// URL the content was extracted from
    pub source: String,

    /// Page title, when the page had one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Kind of source the document came from
    #[serde(rename = "type")]
    pub doc_type: DocumentType,

    /// How the document is embedded; unset for whole small pages
    #[serde(rename = "embeddingType", skip_serializing_if = "Option::is_none")]
    pub embedding_type: Option<EmbeddingType>,

    /// 0-based position of a chunk within its parent document
    #[serde(rename = "chunkIndex", skip_serializing_if = "Option::is_none")]
    pub chunk_index: Option<usize>,
}

/// Closed set of source kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    /// A page fetched from a crawled website
    #[serde(rename = "webpage")]
    Webpage,
}

/// Role of a document in the embedding set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmbeddingType {
    /// An overlapping slice of a larger document
    #[serde(rename = "chunk")]
    Chunk,

    /// A refined running summary over a document's chunks
    #[serde(rename = "summary")]
    Summary,
}

impl Document {
    /// Create a whole-page document with no chunk or summary markers
    pub fn new_page(
        content: String,
        document_id: String,
        source: String,
        title: Option<String>,
    ) -> Self {
        Self {
            content,
            metadata: DocumentMetadata {
                document_id,
                source,
                title,
                doc_type: DocumentType::Webpage,
                embedding_type: None,
                chunk_index: None,
            },
        }
    }
}
