use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;
use tracing::error;

use crate::agent::ResearchAgent;
use crate::error::AgentError;

use super::models::{
    ErrorResponse, GraphResponse, HealthResponse, ReadResponse, ResearchResponse, SearchRequest,
    SearchResponse, SummaryResponse, TopicRequest, UrlRequest,
};

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

fn internal_error(op: &str, e: AgentError) -> (StatusCode, Json<ErrorResponse>) {
    error!(op, error = %e, "request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            detail: e.to_string(),
        }),
    )
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Web Search Agent API is running".to_string(),
    })
}

pub async fn search_handler(
    State(agent): State<Arc<ResearchAgent>>,
    Json(request): Json<SearchRequest>,
) -> ApiResult<SearchResponse> {
    let result = agent
        .search(&request.query)
        .await
        .map_err(|e| internal_error("search", e))?;
    Ok(Json(SearchResponse { result }))
}

pub async fn read_handler(
    State(agent): State<Arc<ResearchAgent>>,
    Json(request): Json<UrlRequest>,
) -> ApiResult<ReadResponse> {
    let content = agent
        .read(&request.url)
        .await
        .map_err(|e| internal_error("read", e))?;
    Ok(Json(ReadResponse { content }))
}

pub async fn research_handler(
    State(agent): State<Arc<ResearchAgent>>,
    Json(request): Json<TopicRequest>,
) -> ApiResult<ResearchResponse> {
    let report = agent
        .research(&request.topic)
        .await
        .map_err(|e| internal_error("research", e))?;
    Ok(Json(ResearchResponse { report }))
}

pub async fn summarize_handler(
    State(agent): State<Arc<ResearchAgent>>,
    Json(request): Json<UrlRequest>,
) -> ApiResult<SummaryResponse> {
    let summary = agent
        .summarize(&request.url)
        .await
        .map_err(|e| internal_error("summarize", e))?;
    Ok(Json(SummaryResponse { summary }))
}

pub async fn graph_handler(
    State(agent): State<Arc<ResearchAgent>>,
    Json(request): Json<TopicRequest>,
) -> ApiResult<GraphResponse> {
    let graph = agent
        .graph(&request.topic)
        .await
        .map_err(|e| internal_error("graph", e))?;
    Ok(Json(GraphResponse { graph }))
}
