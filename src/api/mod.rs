use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::agent::ResearchAgent;

pub mod handlers;
pub mod models;

pub fn create_router(agent: Arc<ResearchAgent>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::health_handler))
        .route("/api/search", post(handlers::search_handler))
        .route("/api/read", post(handlers::read_handler))
        .route("/api/research", post(handlers::research_handler))
        .route("/api/summarize", post(handlers::summarize_handler))
        .route("/api/graph", post(handlers::graph_handler))
        .with_state(agent)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
