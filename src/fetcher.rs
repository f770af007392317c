use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::error::FetchError;

/// Retrieves readability-extracted page text through a rendering proxy.
///
/// The proxy is addressed by appending the target URL to its base, e.g.
/// `https://r.jina.ai/https://example.com/page`.
#[derive(Debug, Clone)]
pub struct ContentFetcher {
    client: reqwest::Client,
    reader_url: String,
}

impl ContentFetcher {
    pub fn new(client: reqwest::Client, reader_url: &str) -> ContentFetcher {
        ContentFetcher {
            client,
            reader_url: reader_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn proxy_url(&self, url: &str) -> String {
        format!("{}/{}", self.reader_url, url)
    }

    /// Never panics or propagates; every failure is a [`FetchError`] whose
    /// text is the sentinel shown to callers.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let proxied = self.proxy_url(url);
        debug!(url, proxied = %proxied, "fetching page");

        let res = self.client.get(&proxied).send().await.map_err(|e| {
            warn!(url, error = %e, "page fetch failed");
            FetchError::Transport
        })?;

        let status = res.status();
        if status != StatusCode::OK {
            warn!(url, status = status.as_u16(), "reader proxy returned non-200");
            return Err(FetchError::Status(status.as_u16()));
        }

        res.text().await.map_err(|e| {
            warn!(url, error = %e, "failed to read page body");
            FetchError::Transport
        })
    }
}
