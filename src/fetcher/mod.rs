pub mod http_fetcher;
pub mod subscription;

use async_trait::async_trait;

use crate::app::Result;

pub use http_fetcher::HttpFetcher;
pub use subscription::{fetch_subscriptions, read_subscriptions, Harvest};

#[async_trait]
pub trait Fetcher {
    /// Fetch the raw body behind a subscription URL.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}
