//! Refine summarization state machine
//!
//! Folds a document's chunks into one running summary, one chunk at a time.
//! The first chunk seeds the summary; every later chunk is merged into it by
//! the completion collaborator. The fold is strictly sequential because each
//! refinement depends on the previous summary, so it cannot be parallelized
//! across chunks.

use tracing::{debug, instrument};

use crate::document::{Document, EmbeddingType};
use crate::model::{CompletionModel, ModelError};

/// System instruction for both the initial summary and every refinement
const SYSTEM_PROMPT: &str = "You are tasked with concising summaries based entirely on the user \
input. While doing so preserve as much information as possible like names, references titles, \
dates, etc.";

/// Where a summarization run currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryPhase {
    /// No chunk has been folded in yet
    Initial,

    /// At least one chunk is folded in, more remain
    Summarizing,

    /// Every chunk is folded in; the running summary is final
    Done,
}

/// Per-document summarization state
///
/// Holds the ordered chunks (fixed once computed), the index of the next
/// chunk to fold in, and the running summary. Lives only for the duration of
/// one document's summarization.
#[derive(Debug)]
pub struct SummaryState {
    chunks: Vec<Document>,
    index: usize,
    summary: Option<Document>,
    summary_length: usize,
}

impl SummaryState {
    /// Start a summarization run over a document's ordered chunks
    pub fn new(chunks: Vec<Document>, summary_length: usize) -> Self {
        Self {
            chunks,
            index: 0,
            summary: None,
            summary_length,
        }
    }

    /// The current phase of the run
    pub fn phase(&self) -> SummaryPhase {
        if self.index >= self.chunks.len() {
            SummaryPhase::Done
        } else if self.index == 0 {
            SummaryPhase::Initial
        } else {
            SummaryPhase::Summarizing
        }
    }

    /// Fold in the next chunk; a no-op once the run is done
    pub async fn advance<C: CompletionModel>(&mut self, model: &C) -> Result<(), ModelError> {
        match self.phase() {
            SummaryPhase::Initial => {
                let chunk = &self.chunks[0];
                let prompt = initial_prompt(self.summary_length, &chunk.content);
                let content = model.complete(SYSTEM_PROMPT, &prompt).await?;
                self.note_overrun(&content);

                let mut summary = chunk.clone();
                summary.content = content;
                summary.metadata.embedding_type = Some(EmbeddingType::Summary);
                summary.metadata.chunk_index = None;
                self.summary = Some(summary);
                self.index = 1;
            }
            SummaryPhase::Summarizing => {
                let chunk = &self.chunks[self.index];
                // the running summary is always present past Initial
                let current = self.summary.as_ref().map(|s| s.content.as_str()).unwrap_or_default();
                let prompt = refine_prompt(self.summary_length, current, &chunk.content);
                let content = model.complete(SYSTEM_PROMPT, &prompt).await?;
                self.note_overrun(&content);

                if let Some(summary) = &mut self.summary {
                    summary.content = content;
                }
                self.index += 1;
            }
            SummaryPhase::Done => {}
        }
        Ok(())
    }

    /// Run the state machine to completion and return the final summary
    ///
    /// Returns `None` when there were no chunks to summarize.
    #[instrument(skip(self, model), fields(chunks = self.chunks.len()))]
    pub async fn run<C: CompletionModel>(
        mut self,
        model: &C,
    ) -> Result<Option<Document>, ModelError> {
        while self.phase() != SummaryPhase::Done {
            self.advance(model).await?;
        }
        Ok(self.summary)
    }

    // the length bound is prompt guidance, not a hard cap; keep oversized
    // output but record it
    fn note_overrun(&self, content: &str) {
        let len = content.chars().count();
        if len > self.summary_length {
            debug!(
                "Summary length {} exceeds target of {}",
                len, self.summary_length
            );
        }
    }
}

fn initial_prompt(summary_length: usize, context: &str) -> String {
    format!(
        "Write a detailed summary, no more than {summary_length} characters \
of the following: {context}"
    )
}

fn refine_prompt(summary_length: usize, current_summary: &str, context: &str) -> String {
    format!(
        "Produce a final detailed summary, no more than {summary_length} characters.\n\
Existing summary up to this point:\n\n\
{current_summary}\n\n\
New context: {context}\n\n\
Given the new context, refine the original summary."
    )
}
