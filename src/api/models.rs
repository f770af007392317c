use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UrlRequest {
    pub url: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TopicRequest {
    pub topic: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SearchResponse {
    pub result: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ReadResponse {
    pub content: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ResearchResponse {
    pub report: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct GraphResponse {
    pub graph: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}
