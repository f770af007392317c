#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::{Value, json};
use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use delve::{Config, ResearchAgent};

pub const SEARCH_KEY: &str = "test-search-key";
pub const GEMINI_KEY: &str = "test-gemini-key";

/// What the fake page serves for one target URL.
#[derive(Clone)]
pub struct FakePage {
    pub status: u16,
    pub body: String,
    pub delay_ms: u64,
}

impl FakePage {
    pub fn ok(body: impl Into<String>) -> FakePage {
        FakePage {
            status: 200,
            body: body.into(),
            delay_ms: 0,
        }
    }

    pub fn status(status: u16) -> FakePage {
        FakePage {
            status,
            body: String::new(),
            delay_ms: 0,
        }
    }

    pub fn delayed(mut self, delay_ms: u64) -> FakePage {
        self.delay_ms = delay_ms;
        self
    }
}

/// Scripted behaviour of the three upstream services.
#[derive(Clone)]
pub struct Script {
    pub search_status: u16,
    pub search_body: String,
    pub pages: HashMap<String, FakePage>,
    pub failing_models: HashSet<String>,
}

impl Default for Script {
    fn default() -> Self {
        Script {
            search_status: 200,
            search_body: json!({}).to_string(),
            pages: HashMap::new(),
            failing_models: HashSet::new(),
        }
    }
}

impl Script {
    pub fn with_search(mut self, body: Value) -> Script {
        self.search_body = body.to_string();
        self
    }

    pub fn with_organic_links(self, links: &[&str]) -> Script {
        let organic: Vec<Value> = links
            .iter()
            .enumerate()
            .map(|(i, link)| json!({"title": format!("Result {i}"), "link": link, "snippet": format!("snippet {i}")}))
            .collect();
        self.with_search(json!({ "organic": organic }))
    }

    pub fn with_page(mut self, url: &str, page: FakePage) -> Script {
        self.pages.insert(url.to_string(), page);
        self
    }

    pub fn with_failing_model(mut self, model: &str) -> Script {
        self.failing_models.insert(model.to_string());
        self
    }
}

#[derive(Default)]
pub struct Recorder {
    pub search_hits: AtomicUsize,
    pub reader_hits: AtomicUsize,
    pub llm_hits: AtomicUsize,
    pub search_requests: Mutex<Vec<Value>>,
    pub reader_urls: Mutex<Vec<String>>,
    pub llm_models: Mutex<Vec<String>>,
}

impl Recorder {
    pub fn search_hits(&self) -> usize {
        self.search_hits.load(Ordering::SeqCst)
    }

    pub fn reader_hits(&self) -> usize {
        self.reader_hits.load(Ordering::SeqCst)
    }

    pub fn llm_hits(&self) -> usize {
        self.llm_hits.load(Ordering::SeqCst)
    }

    pub fn llm_models(&self) -> Vec<String> {
        self.llm_models.lock().unwrap().clone()
    }

    pub fn reader_urls(&self) -> Vec<String> {
        self.reader_urls.lock().unwrap().clone()
    }
}

struct FixtureState {
    script: Script,
    recorder: Arc<Recorder>,
}

pub struct Upstream {
    pub base: String,
    pub recorder: Arc<Recorder>,
}

impl Upstream {
    /// Config aimed at this fixture, with both credentials set.
    pub fn config(&self) -> Config {
        let mut config = Config::with_search_key(SEARCH_KEY);
        config.gemini_api_key = Some(GEMINI_KEY.to_string());
        config.search_url = format!("{}/search", self.base);
        config.reader_url = format!("{}/reader", self.base);
        config.gemini_base_url = self.base.clone();
        config.http_timeout = Duration::from_secs(5);
        config
    }

    pub fn agent(&self) -> ResearchAgent {
        ResearchAgent::new(Arc::new(self.config()))
    }
}

async fn search(
    State(state): State<Arc<FixtureState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.recorder.search_hits.fetch_add(1, Ordering::SeqCst);
    state.recorder.search_requests.lock().unwrap().push(body);

    if headers.get("x-api-key").and_then(|v| v.to_str().ok()) != Some(SEARCH_KEY) {
        return (StatusCode::FORBIDDEN, "bad key").into_response();
    }
    let status = StatusCode::from_u16(state.script.search_status).unwrap();
    (
        status,
        [("content-type", "application/json")],
        state.script.search_body.clone(),
    )
        .into_response()
}

/// Echoes the prompt back as the completion so tests can inspect it.
async fn generate(
    State(state): State<Arc<FixtureState>>,
    Path(call): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.recorder.llm_hits.fetch_add(1, Ordering::SeqCst);
    let model = call.trim_end_matches(":generateContent").to_string();
    state.recorder.llm_models.lock().unwrap().push(model.clone());

    if headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) != Some(GEMINI_KEY) {
        return (StatusCode::UNAUTHORIZED, "bad key").into_response();
    }
    if state.script.failing_models.contains(&model) {
        return (StatusCode::SERVICE_UNAVAILABLE, "model overloaded").into_response();
    }

    let prompt = body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    Json(json!({
        "candidates": [{"content": {"parts": [{"text": prompt}]}}]
    }))
    .into_response()
}

async fn reader(State(state): State<Arc<FixtureState>>, uri: Uri) -> Response {
    state.recorder.reader_hits.fetch_add(1, Ordering::SeqCst);
    let target = uri
        .path()
        .strip_prefix("/reader/")
        .unwrap_or_default()
        .to_string();
    state.recorder.reader_urls.lock().unwrap().push(target.clone());

    let Some(page) = state.script.pages.get(&target).cloned() else {
        return (StatusCode::NOT_FOUND, "no such page").into_response();
    };
    if page.delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(page.delay_ms)).await;
    }
    (StatusCode::from_u16(page.status).unwrap(), page.body).into_response()
}

/// Start the fake search API, reader proxy and LLM backend on one port.
pub async fn start(script: Script) -> Upstream {
    let recorder = Arc::new(Recorder::default());
    let state = Arc::new(FixtureState {
        script,
        recorder: recorder.clone(),
    });

    let app = Router::new()
        .route("/search", post(search))
        .route("/v1beta/models/:call", post(generate))
        .fallback(reader)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("axum serve");
    });

    Upstream {
        base: format!("http://{addr}"),
        recorder,
    }
}

/// A base URL nothing is listening on.
pub async fn unreachable_base() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
