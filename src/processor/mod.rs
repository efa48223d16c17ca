//! Chunk-and-refine pipeline
//!
//! Turns extracted page documents into embedding-ready units. Short documents
//! pass through untouched; long ones are split into overlapping chunks, and
//! documents with a moderate chunk count additionally get one refined summary
//! produced by the completion collaborator.

mod chunking;
mod config;
mod error;
mod summarize;

pub use chunking::split_text;
pub use config::{ProcessorConfig, ProcessorConfigBuilder};
pub use error::ProcessError;
pub use summarize::{SummaryPhase, SummaryState};

use std::collections::HashMap;

use tracing::{debug, info, instrument};

use crate::document::{Document, EmbeddingType};
use crate::model::CompletionModel;

/// Summarize only documents with more than this many chunks
const SUMMARY_MIN_CHUNKS: usize = 1;

/// Summarize only documents with fewer than this many chunks; larger
/// documents are chunked but not summarized to bound completion cost
const SUMMARY_MAX_CHUNKS: usize = 10;

/// Prepare extracted documents for embedding
///
/// Returns the ordered embedding units: whole small documents, chunk
/// documents, and at most one summary per eligible document. Documents are
/// processed sequentially; per-document refinement is inherently sequential.
#[instrument(skip(model, documents, config), fields(documents = documents.len()))]
pub async fn prepare_documents<C: CompletionModel>(
    model: &C,
    documents: &HashMap<String, Document>,
    config: &ProcessorConfig,
) -> Result<Vec<Document>, ProcessError> {
    let mut prepared = Vec::new();

    for (url, document) in documents {
        debug!("Preparing {}", url);
        let length = document.content.chars().count();
        if length < config.chunk_size {
            prepared.push(document.clone());
            continue;
        }

        info!("Splitting {} ({} chars)", url, length);
        let pieces = split_text(&document.content, config.chunk_size, config.overlap());
        info!("Split {} into {} chunks", url, pieces.len());

        let chunks: Vec<Document> = pieces
            .into_iter()
            .enumerate()
            .map(|(index, text)| {
                let mut chunk = document.clone();
                chunk.content = text;
                chunk.metadata.document_id =
                    format!("{}-chunk{}", document.metadata.document_id, index);
                chunk.metadata.embedding_type = Some(EmbeddingType::Chunk);
                chunk.metadata.chunk_index = Some(index);
                chunk
            })
            .collect();

        let eligible = chunks.len() > SUMMARY_MIN_CHUNKS && chunks.len() < SUMMARY_MAX_CHUNKS;
        let summary = if eligible {
            info!("Summarizing {}", url);
            SummaryState::new(chunks.clone(), config.summary_length)
                .run(model)
                .await
                .map_err(|source| ProcessError::Summarize {
                    document_id: document.metadata.document_id.clone(),
                    source,
                })?
        } else {
            None
        };

        prepared.extend(chunks);
        if let Some(mut summary) = summary {
            summary.metadata.document_id =
                format!("{}-summary", document.metadata.document_id);
            info!("Summary length: {}", summary.content.chars().count());
            prepared.push(summary);
        }
    }

    Ok(prepared)
}
