//! # Processor Configuration Module
//!
//! Configuration for the chunk-and-refine pipeline. The chunk size doubles as
//! the splitting threshold: documents shorter than it pass through untouched.
//! Overlap between consecutive chunks is always a fifth of the chunk size.

/// Configuration for the processor
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    /// Chunk size in characters; also the splitting threshold
    pub chunk_size: usize,

    /// Target summary length in characters, passed to the completion
    /// collaborator as prompt guidance
    pub summary_length: usize,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            chunk_size: 3000,
            summary_length: 1000,
        }
    }
}

/// Builder for ProcessorConfig
#[derive(Debug, Default)]
pub struct ProcessorConfigBuilder {
    config: ProcessorConfig,
}

impl ProcessorConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: ProcessorConfig::default(),
        }
    }

    /// Set the chunk size in characters
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.config.chunk_size = chunk_size;
        self
    }

    /// Set the target summary length in characters
    pub fn summary_length(mut self, summary_length: usize) -> Self {
        self.config.summary_length = summary_length;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ProcessorConfig {
        self.config
    }
}

impl ProcessorConfig {
    /// Create a new builder
    pub fn builder() -> ProcessorConfigBuilder {
        ProcessorConfigBuilder::new()
    }

    /// Overlap between consecutive chunks in characters
    pub fn overlap(&self) -> usize {
        self.chunk_size / 5
    }
}
