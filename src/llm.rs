use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::{Config, GEMINI_API_KEY_VAR};
use crate::error::LlmError;

/// Known-good models tried after the caller's preferred one.
pub const FALLBACK_MODELS: [&str; 3] = ["gemini-2.0-flash", "gemini-2.5-flash", "gemini-1.5-flash"];

pub const MISSING_KEY_MESSAGE: &str =
    "Error: GEMINI_API_KEY not found in environment variables. Please add it to your .env file.";

#[async_trait]
pub trait TextModel: Send + Sync {
    /// One generation attempt against one model. No retries.
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, LlmError>;
}

/// Preferred model first, then [`FALLBACK_MODELS`], without duplicates.
pub fn candidate_models(preferred: &str) -> Vec<String> {
    let mut models: Vec<String> = Vec::with_capacity(FALLBACK_MODELS.len() + 1);
    models.push(preferred.to_string());
    for m in FALLBACK_MODELS {
        if !models.iter().any(|existing| existing == m) {
            models.push(m.to_string());
        }
    }
    models
}

/// Call each provider once, in order, until one succeeds.
///
/// On exhaustion every error is returned in attempt order.
pub async fn try_in_order<I, P, T, E, F, Fut>(providers: I, mut call: F) -> Result<T, Vec<E>>
where
    I: IntoIterator<Item = P>,
    F: FnMut(P) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut errors = Vec::new();
    for provider in providers {
        match call(provider).await {
            Ok(out) => return Ok(out),
            Err(e) => errors.push(e),
        }
    }
    Err(errors)
}

/// Prompt in, completion text out, with a single pass over the model
/// fallback chain. Failures come back as text, never as `Err`.
#[derive(Clone)]
pub struct LlmGateway {
    backend: Option<Arc<dyn TextModel>>,
    default_model: String,
}

impl LlmGateway {
    pub fn new(backend: Arc<dyn TextModel>, default_model: &str) -> LlmGateway {
        LlmGateway {
            backend: Some(backend),
            default_model: default_model.to_string(),
        }
    }

    /// A gateway without credentials; every call reports the missing key.
    pub fn unconfigured(default_model: &str) -> LlmGateway {
        LlmGateway {
            backend: None,
            default_model: default_model.to_string(),
        }
    }

    pub fn from_config(config: &Config, client: reqwest::Client) -> LlmGateway {
        match &config.gemini_api_key {
            Some(key) => LlmGateway::new(
                Arc::new(GeminiClient::new(client, &config.gemini_base_url, key)),
                &config.default_model,
            ),
            None => LlmGateway::unconfigured(&config.default_model),
        }
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    pub async fn complete(&self, prompt: &str) -> String {
        self.complete_with(prompt, &self.default_model).await
    }

    pub async fn complete_with(&self, prompt: &str, preferred_model: &str) -> String {
        let Some(backend) = &self.backend else {
            warn!("{GEMINI_API_KEY_VAR} is not set; skipping LLM call");
            return MISSING_KEY_MESSAGE.to_string();
        };

        let result = try_in_order(candidate_models(preferred_model), |model| async move {
            info!(model = %model, "calling LLM");
            match backend.generate(&model, prompt).await {
                Ok(text) => {
                    info!(model = %model, "LLM call succeeded");
                    Ok(text)
                }
                Err(e) => {
                    warn!(model = %model, error = %e, "LLM call failed, trying next model");
                    Err(e)
                }
            }
        })
        .await;

        match result {
            Ok(text) => text,
            Err(errors) => {
                let last = errors
                    .last()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "no models were tried".to_string());
                format!("Error calling Gemini after trying multiple models. Last error: {last}")
            }
        }
    }
}

/// Gemini over the Generative Language REST API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct ReqPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct ReqContent<'a> {
    parts: Vec<ReqPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<ReqContent<'a>>,
}

#[derive(Debug, Deserialize, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize, Default)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize, Default)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<RespPart>,
}

#[derive(Debug, Deserialize, Default)]
struct RespPart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    // candidates[0].content.parts[*].text, concatenated
    fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

impl GeminiClient {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: &str) -> GeminiClient {
        GeminiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{model}:generateContent", self.base_url)
    }
}

#[async_trait]
impl TextModel for GeminiClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        let req = GenerateRequest {
            contents: vec![ReqContent {
                parts: vec![ReqPart { text: prompt }],
            }],
        };

        let resp = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(&req)
            .send()
            .await
            .map_err(|e| LlmError::Request {
                model: model.to_string(),
                detail: e.without_url().to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                model: model.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = resp.json().await.map_err(|e| LlmError::Decode {
            model: model.to_string(),
            detail: e.without_url().to_string(),
        })?;

        let text = parsed.into_text();
        if text.trim().is_empty() {
            return Err(LlmError::EmptyResponse {
                model: model.to_string(),
            });
        }
        Ok(text)
    }
}
