use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::app::{ConfluenceError, Result};
use crate::config::FetchConfig;
use crate::fetcher::Fetcher;

/// Fetches subscriptions over HTTP(S). `file://` URLs are read from disk.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let parsed = Url::parse(url)?;

        match parsed.scheme() {
            "http" | "https" => {}
            "file" => {
                let path = parsed
                    .to_file_path()
                    .map_err(|_| ConfluenceError::Unsupported(url.to_string()))?;
                return Ok(tokio::fs::read(path).await?);
            }
            _ => return Err(ConfluenceError::Unsupported(url.to_string())),
        }

        let response = self.client.get(parsed).send().await?;
        response.error_for_status_ref()?;

        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_url_is_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.txt");
        std::fs::write(&path, "A,http://a/1\n").unwrap();
        let url = Url::from_file_path(&path).unwrap();

        let fetcher = HttpFetcher::new(&FetchConfig::default()).unwrap();
        let body = fetcher.fetch(url.as_str()).await.unwrap();
        assert_eq!(body, b"A,http://a/1\n");
    }

    #[tokio::test]
    async fn test_unsupported_scheme() {
        let fetcher = HttpFetcher::new(&FetchConfig::default()).unwrap();
        let result = fetcher.fetch("ftp://example.com/list.txt").await;
        assert!(matches!(result, Err(ConfluenceError::Unsupported(_))));
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let fetcher = HttpFetcher::new(&FetchConfig::default()).unwrap();
        let result = fetcher.fetch("not a url").await;
        assert!(matches!(result, Err(ConfluenceError::InvalidUrl(_))));
    }
}
