//! Document extraction from crawled pages
//!
//! Converts raw HTML pages into normalized text [`Document`]s. Text is pulled
//! from a fixed, ordered set of structural tags and blank-line runs are
//! collapsed; each document's id is the page URL with the base URL prefix
//! stripped.

use std::collections::HashMap;

use regex::Regex;
use scraper::{Html, Selector};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::crawler::ParsedPage;
use crate::document::Document;
use crate::error::Error as CrateError;

/// Structural tags whose text makes up a page's document, in extraction order
const CONTENT_TAGS: &[&str] = &["p", "section", "article", "title", "h1"];

/// Sentinel id for the page at the base URL itself
const ROOT_DOCUMENT_ID: &str = "root";

/// Error type for extraction
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A tag selector failed to parse
    #[error("selector error: {0}")]
    Selector(String),

    /// The blank-line pattern failed to compile
    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

impl From<ExtractError> for CrateError {
    fn from(err: ExtractError) -> Self {
        CrateError::Extract(err.to_string())
    }
}

/// Extract one document per crawled page
///
/// Pure transform over already-fetched content; no network access.
#[instrument(skip(pages))]
pub fn extract_documents(
    base_url: &str,
    pages: &HashMap<String, ParsedPage>,
) -> Result<HashMap<String, Document>, ExtractError> {
    let selectors = CONTENT_TAGS
        .iter()
        .map(|tag| Selector::parse(tag).map_err(|e| ExtractError::Selector(format!("{tag}: {e:?}"))))
        .collect::<Result<Vec<_>, _>>()?;
    let title_selector =
        Selector::parse("title").map_err(|e| ExtractError::Selector(format!("title: {e:?}")))?;
    let blank_lines = Regex::new(r"\n\n*")?;

    let mut documents = HashMap::new();
    for (url, page) in pages {
        debug!("Extracting {}", url);
        let html = Html::parse_document(&page.html);

        let mut content = String::new();
        for selector in &selectors {
            for element in html.select(selector) {
                content.push_str(&element.text().collect::<String>());
            }
        }
        let content = collapse_blank_lines(&blank_lines, &content);

        let document_id = match url.strip_prefix(base_url) {
            Some("") | None => ROOT_DOCUMENT_ID.to_string(),
            Some(rest) => rest.to_string(),
        };

        let title = html
            .select(&title_selector)
            .next()
            .map(|element| element.text().collect::<String>());

        documents.insert(
            url.clone(),
            Document::new_page(content, document_id, url.clone(), title),
        );
    }

    Ok(documents)
}

/// Collapse every run of newlines into a single newline
fn collapse_blank_lines(pattern: &Regex, text: &str) -> String {
    pattern.replace_all(text, "\n").into_owned()
}
