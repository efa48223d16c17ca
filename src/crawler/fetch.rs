//! Page fetching for the crawler
//!
//! The crawler talks to the network through the [`Fetcher`] trait so the
//! traversal logic can be exercised against a test server or a canned fake.
//! [`HttpFetcher`] is the real implementation: a reqwest client with a
//! per-request timeout.

use std::time::Duration;

use crate::crawler::error::CrawlError;

/// Retrieves the raw body of a URL
pub trait Fetcher {
    /// Fetch a URL and return its body as text
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, CrawlError>> + Send;
}

/// HTTP fetcher backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with the given per-request timeout and user agent
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, CrawlError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, CrawlError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::FetchStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(Duration::from_secs(5), "webingest-test/0.1").unwrap()
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/page")
            .with_status(200)
            .with_body("<html><body>hello</body></html>")
            .create_async()
            .await;

        let body = fetcher()
            .fetch(&format!("{}/page", server.url()))
            .await
            .unwrap();
        assert!(body.contains("hello"));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_error_status() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let result = fetcher().fetch(&format!("{}/missing", server.url())).await;
        assert!(matches!(
            result,
            Err(CrawlError::FetchStatus { status: 404, .. })
        ));

        mock.assert_async().await;
    }
}
