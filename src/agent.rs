use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::data_models::truncate_chars;
use crate::error::AgentError;
use crate::fetcher::ContentFetcher;
use crate::llm::LlmGateway;
use crate::prompts::{diagram_prompt, summary_prompt};
use crate::search::SearchClient;

/// Character budget for page text returned by `read` or fed to the summarizer.
pub const PAGE_CHAR_LIMIT: usize = 12_000;
pub const TRUNCATION_MARKER: &str = "\n... [Content Truncated]";

/// The five operations shared by the HTTP and MCP front-ends.
///
/// Holds no per-request state. Each operation builds its own HTTP client so
/// connections are only reused within a single call.
#[derive(Debug, Clone)]
pub struct ResearchAgent {
    config: Arc<Config>,
}

impl ResearchAgent {
    pub fn new(config: Arc<Config>) -> ResearchAgent {
        ResearchAgent { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn http_client(&self) -> Result<reqwest::Client, AgentError> {
        reqwest::Client::builder()
            .timeout(self.config.http_timeout)
            .build()
            .map_err(AgentError::HttpClient)
    }

    pub(crate) fn search_client(&self, client: reqwest::Client) -> SearchClient {
        SearchClient::new(
            client,
            &self.config.search_url,
            &self.config.search_api_key,
            &self.config.search_region,
        )
    }

    pub(crate) fn fetcher(&self, client: reqwest::Client) -> ContentFetcher {
        ContentFetcher::new(client, &self.config.reader_url)
    }

    pub(crate) fn gateway(&self, client: reqwest::Client) -> LlmGateway {
        LlmGateway::from_config(&self.config, client)
    }

    pub async fn search(&self, query: &str) -> Result<String, AgentError> {
        let client = self.http_client()?;
        Ok(self.search_client(client).search(query).await)
    }

    /// Page text capped at [`PAGE_CHAR_LIMIT`] characters, or the fetch
    /// sentinel. Never returns `Err`.
    pub async fn read(&self, url: &str) -> Result<String, AgentError> {
        info!(url, "reading page");
        let client = match self.http_client() {
            Ok(client) => client,
            Err(e) => return Ok(format!("Error reading page: {e}")),
        };

        let content = match self.fetcher(client).fetch(url).await {
            Ok(text) => text,
            Err(e) => return Ok(e.to_string()),
        };

        Ok(match truncate_chars(&content, PAGE_CHAR_LIMIT) {
            Some(head) => format!("{head}{TRUNCATION_MARKER}"),
            None => content,
        })
    }

    /// Summary of one page under a `## Summary of <url>` heading. A failed
    /// fetch returns its sentinel without calling the LLM. Never returns `Err`.
    pub async fn summarize(&self, url: &str) -> Result<String, AgentError> {
        info!(url, "summarizing page");
        let client = match self.http_client() {
            Ok(client) => client,
            Err(e) => return Ok(format!("Error summarizing page: {e}")),
        };

        let content = match self.fetcher(client.clone()).fetch(url).await {
            Ok(text) => text,
            Err(e) => return Ok(e.to_string()),
        };
        let content = truncate_chars(&content, PAGE_CHAR_LIMIT).unwrap_or(&content);

        let summary = self.gateway(client).complete(&summary_prompt(content)).await;
        Ok(format!("## Summary of {url}\n\n{summary}"))
    }

    /// Mermaid flowchart markup for `topic`, passed through unvalidated.
    pub async fn graph(&self, topic: &str) -> Result<String, AgentError> {
        info!(topic, "generating graph");
        let client = self.http_client()?;
        Ok(self.gateway(client).complete(&diagram_prompt(topic)).await)
    }
}
