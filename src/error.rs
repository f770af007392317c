use thiserror::Error;

/// Startup configuration failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} not found in environment or .env file")]
    MissingVar(&'static str),
}

/// Why the reader proxy could not produce page text.
///
/// The `Display` output is the sentinel text callers see in place of content.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("[Error: {0}]")]
    Status(u16),
    #[error("[Error: Failed to fetch]")]
    Transport,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Error: Search API returned status {0}.")]
    Status(u16),
    #[error("Error: Failed to perform search. Details: {0}")]
    Request(String),
}

/// A single failed generation attempt against one model.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LlmError {
    #[error("model {model} returned status {status}: {body}")]
    Status {
        model: String,
        status: u16,
        body: String,
    },
    #[error("request to model {model} failed: {detail}")]
    Request { model: String, detail: String },
    #[error("model {model} returned an unreadable response: {detail}")]
    Decode { model: String, detail: String },
    #[error("model {model} returned no text")]
    EmptyResponse { model: String },
}

/// Failures that escape the per-call sentinel conversion and reach the
/// front-ends.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}
