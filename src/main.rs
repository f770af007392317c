use anyhow::Result;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use delve::api::create_router;
use delve::{Config, ResearchAgent};

#[derive(Parser)]
#[command(name = "delve", about = "Web search, page reading and LLM research agent")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API
    Serve {
        #[arg(long, default_value = "0.0.0.0:8000")]
        addr: SocketAddr,
    },
    /// Serve the tools over MCP stdio
    Mcp,
    /// Search the web and print the result block
    Search { query: String },
    /// Print the readable text of a page
    Read { url: String },
    /// Run deep research on a topic and print the report
    Research { topic: String },
    /// Summarize a page
    Summarize { url: String },
    /// Print a Mermaid flowchart for a topic
    Graph { topic: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout belongs to the MCP transport, so logs go to stderr
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let agent = Arc::new(ResearchAgent::new(Arc::new(config)));

    let output = match cli.command {
        Command::Serve { addr } => return serve(agent, addr).await,
        Command::Mcp => {
            delve::mcp::serve_stdio(agent).await?;
            return Ok(());
        }
        Command::Search { query } => agent.search(&query).await?,
        Command::Read { url } => agent.read(&url).await?,
        Command::Research { topic } => agent.research(&topic).await?,
        Command::Summarize { url } => agent.summarize(&url).await?,
        Command::Graph { topic } => agent.graph(&topic).await?,
    };
    println!("{output}");
    Ok(())
}

async fn serve(agent: Arc<ResearchAgent>, addr: SocketAddr) -> Result<()> {
    let app = create_router(agent);
    let listener = TcpListener::bind(addr).await?;
    info!(address = %addr, "HTTP API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("shutdown signal received");
        })
        .await?;
    Ok(())
}
