use rmcp::{
    ErrorData as McpError, ServiceExt,
    handler::server::router::tool::ToolRouter as RmcpToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    transport::stdio,
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

use crate::agent::ResearchAgent;
use crate::error::AgentError;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct QueryArgs {
    /// What to search the web for.
    pub query: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UrlArgs {
    /// Absolute http(s) URL of the page.
    pub url: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct TopicArgs {
    /// Topic or question to work on.
    pub topic: String,
}

fn text_result(op: &str, result: Result<String, AgentError>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
        Err(e) => {
            error!(op, error = %e, "tool call failed");
            Err(McpError::internal_error(e.to_string(), None))
        }
    }
}

#[derive(Clone)]
pub struct DelveMcp {
    tool_router: RmcpToolRouter<Self>,
    agent: Arc<ResearchAgent>,
}

#[tool_router]
impl DelveMcp {
    pub fn new(agent: Arc<ResearchAgent>) -> DelveMcp {
        DelveMcp {
            tool_router: Self::tool_router(),
            agent,
        }
    }

    #[tool(description = "Search the web and return the top results as text")]
    async fn search_web(
        &self,
        params: Parameters<QueryArgs>,
    ) -> Result<CallToolResult, McpError> {
        let args = params.0;
        text_result("search_web", self.agent.search(&args.query).await)
    }

    #[tool(description = "Fetch a web page and return its readable text")]
    async fn read_page(&self, params: Parameters<UrlArgs>) -> Result<CallToolResult, McpError> {
        let args = params.0;
        text_result("read_page", self.agent.read(&args.url).await)
    }

    #[tool(
        description = "Research a topic: search, read the top pages, and write a cited report"
    )]
    async fn deep_research(
        &self,
        params: Parameters<TopicArgs>,
    ) -> Result<CallToolResult, McpError> {
        let args = params.0;
        text_result("deep_research", self.agent.research(&args.topic).await)
    }

    #[tool(description = "Fetch a web page and summarize it")]
    async fn summarize_page(
        &self,
        params: Parameters<UrlArgs>,
    ) -> Result<CallToolResult, McpError> {
        let args = params.0;
        text_result("summarize_page", self.agent.summarize(&args.url).await)
    }

    #[tool(description = "Generate a Mermaid flowchart (graph TD) describing a topic")]
    async fn generate_graph(
        &self,
        params: Parameters<TopicArgs>,
    ) -> Result<CallToolResult, McpError> {
        let args = params.0;
        text_result("generate_graph", self.agent.graph(&args.topic).await)
    }
}

#[tool_handler]
impl rmcp::ServerHandler for DelveMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Web research tools: search, read pages, deep research, summaries and topic graphs. Every tool returns plain text."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Serve the tools over stdin/stdout until the client disconnects.
pub async fn serve_stdio(agent: Arc<ResearchAgent>) -> Result<(), McpError> {
    info!("starting MCP server on stdio");
    let running = DelveMcp::new(agent)
        .serve(stdio())
        .await
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    running
        .waiting()
        .await
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(())
}
