use tracing::{info, warn};

use crate::data_models::{SearchResultSet, SerperRequest, SerperResponse};
use crate::error::SearchError;

/// Client for the Serper web search API.
#[derive(Debug, Clone)]
pub struct SearchClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    region: String,
}

impl SearchClient {
    pub fn new(client: reqwest::Client, endpoint: &str, api_key: &str, region: &str) -> Self {
        SearchClient {
            client,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
            region: region.to_string(),
        }
    }

    /// Run one query and return the formatted result block, or an error
    /// message in its place.
    pub async fn search(&self, query: &str) -> String {
        match self.search_results(query).await {
            Ok(results) => results.render(),
            Err(e) => e.to_string(),
        }
    }

    pub async fn search_results(&self, query: &str) -> Result<SearchResultSet, SearchError> {
        info!(query, "searching");

        let response = self
            .client
            .post(&self.endpoint)
            .header("X-API-KEY", &self.api_key)
            .json(&SerperRequest {
                q: query,
                gl: &self.region,
            })
            .send()
            .await
            .map_err(|e| SearchError::Request(e.to_string()))?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            warn!(query, status = status.as_u16(), "search API returned an error status");
            return Err(SearchError::Status(status.as_u16()));
        }

        let data: SerperResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Request(e.to_string()))?;

        let results = SearchResultSet::from(data);
        info!(
            query,
            hits = results.hits.len(),
            direct_answer = results.direct_answer.is_some(),
            "search complete"
        );
        Ok(results)
    }
}
