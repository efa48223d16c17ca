//! # webingest
//!
//! Crawl a single website, extract its readable content, chunk and summarize
//! it with a completion model, and load the results into a Chroma vector
//! store for retrieval.
//!
//! The crate is organized as a pipeline:
//! - [`crawler`] walks the site depth-first, collecting same-site pages
//! - [`extractor`] turns raw HTML into plain-text [`document::Document`]s
//! - [`processor`] splits long documents into overlapping chunks and folds
//!   them into a running summary
//! - [`loader`] embeds the prepared documents and upserts them into a
//!   per-site collection
//!
//! Model access goes through the [`model::CompletionModel`] and
//! [`model::EmbeddingModel`] traits, so the pipeline can run against Azure
//! OpenAI deployments in production and scripted mocks in tests.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use webingest::crawler::{crawl_site, CrawlerConfig, HttpFetcher};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fetcher = HttpFetcher::new(Duration::from_secs(30), "webingest/0.1")?;
//!     let pages = crawl_site(&fetcher, "https://example.com", &CrawlerConfig::default()).await?;
//!     for url in pages.keys() {
//!         println!("{url}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod crawler;
pub mod document;
mod error;
pub mod extractor;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod processor;

pub use error::{Error, Result};
