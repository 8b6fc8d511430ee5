#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::body::{Body, Bytes};
use axum::extract::{Query, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, Method, Request, StatusCode, Uri};
use axum::{Json, Router};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::NaiveDate;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower::ServiceExt;

use bff_service::clock::FixedClock;
use bff_service::{create_router, AppState};
use shared::BackendConfig;

pub const TEST_SUBJECT: &str = "auth0|player-1";
pub const TEST_USER_ID: &str = "auth0-player-1";
pub const SAMPLE_PUZZLE: &str =
    "310084002200150006570003010423708095760030000009562030050006070007000900000001500";

/// One request as seen by the mock backend.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub authorization: Option<String>,
}

impl RecordedCall {
    pub fn is(&self, method: Method, path: &str) -> bool {
        self.method == method && self.path == path
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn query_values(&self, key: &str) -> Vec<&str> {
        self.query
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

type Responder = Arc<dyn Fn(&RecordedCall) -> (StatusCode, Value) + Send + Sync>;

#[derive(Clone)]
struct MockState {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    responder: Responder,
}

/// In-process stand-in for the puzzle catalog and both user stores.
///
/// All three backends point at the same listener; the responder tells them
/// apart by method and path.
pub struct MockBackend {
    pub base_url: String,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    handle: JoinHandle<()>,
}

impl MockBackend {
    pub async fn start<F>(responder: F) -> anyhow::Result<Self>
    where
        F: Fn(&RecordedCall) -> (StatusCode, Value) + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let calls = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            calls: calls.clone(),
            responder: Arc::new(responder),
        };

        let app = Router::new().fallback(record_and_respond).with_state(state);
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base_url: format!("http://{}", addr),
            calls,
            handle,
        })
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// `METHOD path` of every call, in arrival order.
    pub fn call_log(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|c| format!("{} {}", c.method, c.path))
            .collect()
    }

    pub fn backend_config(&self) -> BackendConfig {
        BackendConfig {
            puzzle_url: self.base_url.clone(),
            user_active_games_url: self.base_url.clone(),
            user_game_statistics_url: self.base_url.clone(),
            timeout_ms: 2000,
        }
    }

    /// Router wired to this mock, with "today" pinned to `today`.
    pub fn router(&self, today: NaiveDate) -> anyhow::Result<Router> {
        let state = AppState::with_clock(&self.backend_config(), Arc::new(FixedClock(today)))?;
        Ok(create_router(state))
    }
}

/// Router whose backends all point at a closed local port.
pub fn unreachable_router(today: NaiveDate) -> anyhow::Result<Router> {
    let config = BackendConfig {
        puzzle_url: "http://127.0.0.1:9".to_string(),
        user_active_games_url: "http://127.0.0.1:9".to_string(),
        user_game_statistics_url: "http://127.0.0.1:9".to_string(),
        timeout_ms: 500,
    };
    let state = AppState::with_clock(&config, Arc::new(FixedClock(today)))?;
    Ok(create_router(state))
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn record_and_respond(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let call = RecordedCall {
        method,
        path: uri.path().to_string(),
        query,
        body: serde_json::from_slice(&body).ok(),
        authorization: headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    };

    let (status, value) = (state.responder)(&call);
    state.calls.lock().unwrap().push(call);

    (status, Json(value))
}

pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

/// Unsigned JWT carrying `sub`, as an `Authorization` header value.
pub fn bearer_for(subject: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(json!({ "sub": subject }).to_string());
    format!("Bearer {}.{}.test-signature", header, payload)
}

pub fn test_bearer() -> String {
    bearer_for(TEST_SUBJECT)
}

pub fn sample_puzzle(difficulty: i64) -> Value {
    json!({
        "puzzle": SAMPLE_PUZZLE,
        "puzzleSolution": "316984752284157396579623418423718695765439821189562734852396175637245981941871563",
        "difficulty": difficulty,
    })
}

pub fn sample_active_game(current_time: i64, hints: i64, wrong: i64) -> Value {
    let mut game = sample_puzzle(500);
    game["userID"] = json!(TEST_USER_ID);
    game["currentTime"] = json!(current_time);
    game["numHintsUsed"] = json!(hints);
    game["numWrongCellsPlayed"] = json!(wrong);
    game
}

/// Sends one request through the router; non-JSON bodies come back as a string.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    bearer: Option<&str>,
    body: Option<Value>,
) -> anyhow::Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(bearer) = bearer {
        builder = builder.header(AUTHORIZATION, bearer);
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))?,
        None => builder.body(Body::empty())?,
    };

    dispatch(app, request).await
}

/// Like [`send`], with a raw body and an optional content type.
pub async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    bearer: Option<&str>,
    content_type: Option<&str>,
    body: &str,
) -> anyhow::Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(bearer) = bearer {
        builder = builder.header(AUTHORIZATION, bearer);
    }
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }

    dispatch(app, builder.body(Body::from(body.to_string()))?).await
}

async fn dispatch(app: &Router, request: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;

    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

    Ok((status, value))
}
