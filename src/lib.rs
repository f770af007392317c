pub mod agent;
pub mod api;
pub mod config;
pub mod data_models;
pub mod error;
pub mod fanout;
pub mod fetcher;
pub mod llm;
pub mod mcp;
pub mod prompts;
pub mod research;
pub mod search;

pub use agent::ResearchAgent;
pub use config::Config;
