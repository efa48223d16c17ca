//! Site crawler module
//!
//! Crawls a single website starting from a base URL, producing a deduplicated
//! map of canonical URL to raw page content. Traversal is depth-first over an
//! explicit worklist, bounded by the configured page limit and the base
//! domain; discovered links are classified first so file downloads are never
//! fetched, then normalized to root-relative form before being followed.

mod classify;
mod config;
mod error;
mod fetch;

pub use classify::{classify_link, LinkKind};
pub use config::CrawlerConfig;
pub use error::CrawlError;
pub use fetch::{Fetcher, HttpFetcher};

use std::collections::HashMap;

use scraper::{Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

/// A fetched page, keyed in the crawl map by its canonical URL
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// Canonical (fragment-stripped) URL of the page
    pub url: String,

    /// Raw HTML body
    pub html: String,
}

/// A raw anchor target found on a page
#[derive(Debug, Clone)]
struct RawLink {
    href: String,
    download: bool,
}

/// Crawl a website and return a map of URL to fetched page
///
/// The worklist is a stack, so the first link on a page is fully expanded
/// (including its reachable subtree under the limit) before its siblings;
/// this ordering decides which pages are captured when the limit is hit.
/// A fetch failure skips that URL and its links; the crawl continues.
///
/// One page past the limit may be recorded, because the bound is checked
/// before the fetch that trips it.
#[instrument(skip(fetcher, config))]
pub async fn crawl_site<F: Fetcher>(
    fetcher: &F,
    base_url: &str,
    config: &CrawlerConfig,
) -> Result<HashMap<String, ParsedPage>, CrawlError> {
    let parsed_base = Url::parse(base_url)?;
    if parsed_base.host_str().is_none() {
        return Err(CrawlError::MissingHost(base_url.to_string()));
    }
    let origin = parsed_base.origin().ascii_serialization();

    let mut pages: HashMap<String, ParsedPage> = HashMap::new();
    let mut frontier = vec![strip_fragment(base_url).to_string()];

    while let Some(current) = frontier.pop() {
        if pages.contains_key(&current) {
            debug!("Already processed {}", current);
            continue;
        }
        if pages.len() > config.page_limit {
            info!("Reached limit of {} pages", config.page_limit);
            continue;
        }
        // in-domain absolute URLs and root-relative paths only
        if !current.starts_with(base_url) && !current.starts_with('/') {
            debug!("Outside of domain: {}", current);
            continue;
        }
        // non-HTML endpoint that survives link classification when it is the
        // base URL itself
        if current.ends_with(".pdf") {
            debug!("Skipping PDF: {}", current);
            continue;
        }

        info!("Processing {}", current);
        let html = match fetcher.fetch(&current).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Skipping {}: {}", current, e);
                continue;
            }
        };

        let links = extract_links(&html);
        debug!("Found {} links on {}", links.len(), current);
        pages.insert(
            current.clone(),
            ParsedPage {
                url: current,
                html,
            },
        );

        // push in reverse so the first link on the page pops first
        for link in links.into_iter().rev() {
            if let LinkKind::File { extension } = classify_link(&link.href, link.download) {
                debug!("Skipping file link {} ({})", link.href, extension);
                continue;
            }
            let normalized = normalize_link(&link.href);
            if normalized.starts_with('/') {
                frontier.push(format!("{}{}", origin, normalized));
            }
        }
    }

    Ok(pages)
}

/// Normalize an anchor href for traversal
///
/// Strips any fragment, collapses duplicate slashes, resolves `.` and `..`
/// segments, and drops the trailing slash. A link starting with `/`, `./` or
/// `../` comes out root-relative; a bare `/` collapses to the empty string
/// and is never followed.
pub fn normalize_link(href: &str) -> String {
    let href = href.split('#').next().unwrap_or_default();
    let root_relative = href.starts_with('/') || href.starts_with("./") || href.starts_with("../");

    let mut segments: Vec<&str> = Vec::new();
    for segment in href.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        return String::new();
    }
    if root_relative {
        format!("/{}", segments.join("/"))
    } else {
        segments.join("/")
    }
}

/// Collect every anchor target on a page along with its download marker
fn extract_links(html: &str) -> Vec<RawLink> {
    let document = Html::parse_document(html);
    let selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(e) => {
            warn!("Failed to parse anchor selector: {e:?}");
            return Vec::new();
        }
    };

    document
        .select(&selector)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?;
            Some(RawLink {
                href: href.to_string(),
                download: anchor.value().attr("download").is_some(),
            })
        })
        .collect()
}

fn strip_fragment(url: &str) -> &str {
    url.split('#').next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Server, ServerGuard};
    use std::time::Duration;

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(Duration::from_secs(5), "webingest-test/0.1").unwrap()
    }

    fn config(page_limit: usize) -> CrawlerConfig {
        CrawlerConfig::builder().page_limit(page_limit).build()
    }

    fn page_body(links: &[&str]) -> String {
        let anchors: String = links
            .iter()
            .map(|href| format!("<a href=\"{href}\">link</a>"))
            .collect();
        format!("<html><body><p>content</p>{anchors}</body></html>")
    }

    async fn mock_page(server: &mut ServerGuard, path: &str, links: &[&str]) -> mockito::Mock {
        server
            .mock("GET", path)
            .with_status(200)
            .with_body(page_body(links))
            .expect(1)
            .create_async()
            .await
    }

    #[test]
    fn test_normalize_link() {
        assert_eq!(normalize_link("./a//b/../c/"), "/a/c");
        assert_eq!(normalize_link("/about/"), "/about");
        assert_eq!(normalize_link("/about#team"), "/about");
        assert_eq!(normalize_link("//a//b"), "/a/b");
        assert_eq!(normalize_link("/"), "");
        assert_eq!(normalize_link("/a/.."), "");
    }

    #[test]
    fn test_normalize_link_keeps_relative_paths_relative() {
        // plain relative links are not root-relative and are never followed
        assert_eq!(normalize_link("page.html"), "page.html");
        assert_eq!(normalize_link("a/./b"), "a/b");
        // external absolute URLs lose their double slash and stay unfollowable
        assert_eq!(
            normalize_link("https://other.com/page"),
            "https:/other.com/page"
        );
    }

    #[tokio::test]
    async fn test_crawl_follows_site_links_only() {
        let mut server = Server::new_async().await;
        let base = server.url();

        let root = mock_page(&mut server, "/", &["/about", "https://other.com/page"]).await;
        let about = mock_page(&mut server, "/about", &["/about/team"]).await;
        let team = mock_page(&mut server, "/about/team", &["/about"]).await;

        let pages = crawl_site(&fetcher(), &base, &config(5)).await.unwrap();

        assert_eq!(pages.len(), 3);
        assert!(pages.contains_key(&base));
        assert!(pages.contains_key(&format!("{base}/about")));
        assert!(pages.contains_key(&format!("{base}/about/team")));

        // each page fetched exactly once; /about is linked twice but deduped
        root.assert_async().await;
        about.assert_async().await;
        team.assert_async().await;
    }

    #[tokio::test]
    async fn test_crawl_respects_page_limit() {
        let mut server = Server::new_async().await;
        let base = server.url();

        let _root = mock_page(&mut server, "/", &["/a", "/b", "/c"]).await;
        let _a = mock_page(&mut server, "/a", &[]).await;
        let b = server.mock("GET", "/b").expect(0).create_async().await;
        let c = server.mock("GET", "/c").expect(0).create_async().await;

        let pages = crawl_site(&fetcher(), &base, &config(1)).await.unwrap();

        // limit + the page that tripped the check
        assert_eq!(pages.len(), 2);
        assert!(pages.contains_key(&format!("{base}/a")));
        b.assert_async().await;
        c.assert_async().await;
    }

    #[tokio::test]
    async fn test_crawl_expands_depth_first() {
        let mut server = Server::new_async().await;
        let base = server.url();

        let _root = mock_page(&mut server, "/", &["/a", "/b"]).await;
        let _a = mock_page(&mut server, "/a", &["/a/deep"]).await;
        let _deep = mock_page(&mut server, "/a/deep", &[]).await;
        let b = server.mock("GET", "/b").expect(0).create_async().await;

        // room for three pages: /a's subtree is exhausted before /b is visited
        let pages = crawl_site(&fetcher(), &base, &config(2)).await.unwrap();

        assert_eq!(pages.len(), 3);
        assert!(pages.contains_key(&format!("{base}/a/deep")));
        b.assert_async().await;
    }

    #[tokio::test]
    async fn test_crawl_skips_failed_fetches() {
        let mut server = Server::new_async().await;
        let base = server.url();

        let _root = mock_page(&mut server, "/", &["/broken", "/good"]).await;
        let _broken = server
            .mock("GET", "/broken")
            .with_status(500)
            .expect(1)
            .create_async()
            .await;
        let _good = mock_page(&mut server, "/good", &[]).await;

        let pages = crawl_site(&fetcher(), &base, &config(5)).await.unwrap();

        assert_eq!(pages.len(), 2);
        assert!(!pages.contains_key(&format!("{base}/broken")));
        assert!(pages.contains_key(&format!("{base}/good")));
    }

    #[tokio::test]
    async fn test_crawl_skips_file_links() {
        let mut server = Server::new_async().await;
        let base = server.url();

        let _root = mock_page(
            &mut server,
            "/",
            &["/report.pdf", "/archive.zip", "/installer"],
        )
        .await;
        let pdf = server.mock("GET", "/report.pdf").expect(0).create_async().await;
        let zip = server.mock("GET", "/archive.zip").expect(0).create_async().await;
        let _installer = mock_page(&mut server, "/installer", &[]).await;

        let pages = crawl_site(&fetcher(), &base, &config(5)).await.unwrap();

        assert_eq!(pages.len(), 2);
        pdf.assert_async().await;
        zip.assert_async().await;
    }

    #[tokio::test]
    async fn test_crawl_skips_download_marked_links() {
        let mut server = Server::new_async().await;
        let base = server.url();

        let _root = server
            .mock("GET", "/")
            .with_status(200)
            .with_body("<html><body><a href=\"/form\" download>get</a></body></html>")
            .expect(1)
            .create_async()
            .await;
        let form = server.mock("GET", "/form").expect(0).create_async().await;

        let pages = crawl_site(&fetcher(), &base, &config(5)).await.unwrap();

        assert_eq!(pages.len(), 1);
        form.assert_async().await;
    }

    #[tokio::test]
    async fn test_crawl_rejects_pdf_base_url() {
        let mut server = Server::new_async().await;
        let pdf = server.mock("GET", "/doc.pdf").expect(0).create_async().await;

        let pages = crawl_site(
            &fetcher(),
            &format!("{}/doc.pdf", server.url()),
            &config(5),
        )
        .await
        .unwrap();

        assert!(pages.is_empty());
        pdf.assert_async().await;
    }

    #[tokio::test]
    async fn test_crawl_invalid_base_url() {
        let result = crawl_site(&fetcher(), "not a url", &config(5)).await;
        assert!(result.is_err());
    }
}
