use tracing::info;

use crate::agent::ResearchAgent;
use crate::data_models::{LINK_PREFIX, truncate_chars};
use crate::error::AgentError;
use crate::fanout::join_ordered;
use crate::prompts::answer_prompt;

/// At most this many search results are fetched and cited.
pub const MAX_SOURCES: usize = 3;
/// Character budget for each source inside the research context.
pub const SOURCE_CHAR_LIMIT: usize = 8_000;
pub const NO_LINKS: &str = "No links found to research.";

const SOURCE_SEPARATOR: &str = "====================";

/// URLs from every `Link: ` line of a search result block, in order.
pub fn extract_links(search_block: &str) -> Vec<String> {
    search_block
        .lines()
        .filter_map(|line| line.strip_prefix(LINK_PREFIX))
        .map(|link| link.trim().to_string())
        .collect()
}

/// Labeled, individually truncated page texts handed to the answer prompt.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResearchContext {
    sources: Vec<(String, String)>,
}

impl ResearchContext {
    pub fn new() -> ResearchContext {
        ResearchContext::default()
    }

    pub fn push(&mut self, link: &str, content: &str) {
        let content = match truncate_chars(content, SOURCE_CHAR_LIMIT) {
            Some(head) => format!("{head}..."),
            None => content.to_string(),
        };
        self.sources.push((link.to_string(), content));
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn render(&self) -> String {
        self.sources
            .iter()
            .enumerate()
            .map(|(i, (link, content))| {
                format!("SOURCE {} ({link}):\n{content}\n\n{SOURCE_SEPARATOR}\n\n", i + 1)
            })
            .collect()
    }
}

impl ResearchAgent {
    /// Search, read the top [`MAX_SOURCES`] results concurrently, and have
    /// the LLM synthesize a cited report.
    ///
    /// Fetch failures are folded into the context as their sentinel text.
    pub async fn research(&self, topic: &str) -> Result<String, AgentError> {
        info!(topic, "starting deep research");

        let search_block = self.search(topic).await?;
        let links: Vec<String> = extract_links(&search_block)
            .into_iter()
            .take(MAX_SOURCES)
            .collect();
        if links.is_empty() {
            info!(topic, "search produced no links");
            return Ok(NO_LINKS.to_string());
        }

        let client = self.http_client()?;
        let fetcher = self.fetcher(client.clone());
        let contents = join_ordered(links.clone(), MAX_SOURCES, |link| {
            let fetcher = fetcher.clone();
            async move {
                match fetcher.fetch(&link).await {
                    Ok(text) => text,
                    Err(e) => e.to_string(),
                }
            }
        })
        .await;

        let mut context = ResearchContext::new();
        for (link, content) in links.iter().zip(&contents) {
            context.push(link, content);
        }
        info!(topic, sources = context.len(), "research context assembled");

        let prompt = answer_prompt(topic, &context.render());
        Ok(self.gateway(client).complete(&prompt).await)
    }
}
