use anyhow::{Context, Result};
use async_trait::async_trait;

/// Where a poller gets its listing text from.
///
/// The trait exists so poll cycles can be driven against scripted sources in
/// tests; the one production implementation talks HTTP.
#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn fetch_listing(&self) -> Result<String>;
}

/// Fetches `http://{address}/list` with the transport's default timeouts.
pub struct HttpListingSource {
    client: reqwest::Client,
    url: String,
}

impl HttpListingSource {
    pub fn new(address: &str) -> HttpListingSource {
        HttpListingSource {
            client: reqwest::Client::new(),
            url: format!("http://{}/list", address),
        }
    }
}

#[async_trait]
impl ListingSource for HttpListingSource {
    async fn fetch_listing(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", self.url))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Listing request to {} failed with status {}",
                self.url,
                response.status()
            );
        }

        response
            .text()
            .await
            .with_context(|| format!("Failed to read listing body from {}", self.url))
    }
}
