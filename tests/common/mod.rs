#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

use axum::{
    body::Bytes,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use newsdesk::{config::AppConfig, console::Console};
use serde_json::{json, Value};
use std::{
    net::SocketAddr,
    path::PathBuf,
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::{net::TcpListener, task::JoinHandle};

pub const MOBILE: &str = "13800001111";
pub const CODE: &str = "123456";
pub const TOKEN: &str = "abc123";

/// Body served verbatim by `GET /raw`.
pub const RAW_BODY: &str = r#"{"message":"OK","data":{"nested":[1,2,3],"flag":true},"extra":"kept"}"#;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone, Default)]
struct MockState {
    requests: Arc<Mutex<Vec<Recorded>>>,
}

/// In-process stand-in for the content API, mounted under `/v1_0`.
pub struct MockApi {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<Recorded>>>,
    handle: JoinHandle<()>,
}

impl MockApi {
    pub async fn start() -> Self {
        let state = MockState::default();
        let requests = state.requests.clone();
        let app = Router::new().fallback(route).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock api");
        let addr = listener.local_addr().expect("mock api address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve mock api");
        });

        Self {
            addr,
            requests,
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/v1_0", self.addr)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Recorded> {
        self.requests().last().cloned()
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn ok(data: Value) -> Response {
    (StatusCode::OK, axum::Json(json!({ "message": "OK", "data": data }))).into_response()
}

fn failure(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(json!({ "message": message }))).into_response()
}

async fn route(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string);
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let path = uri.path().to_string();

    state.requests.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: path.clone(),
        authorization: authorization.clone(),
        body: payload.clone(),
    });

    let signed_in = authorization.as_deref() == Some(format!("Bearer {TOKEN}").as_str());
    let method_name = method.to_string();

    match (method_name.as_str(), path.as_str()) {
        ("POST", "/v1_0/authorizations") => {
            if payload["mobile"] == MOBILE && payload["code"] == CODE {
                ok(json!({ "token": TOKEN, "refresh_token": "refresh-xyz" }))
            } else {
                failure(StatusCode::BAD_REQUEST, "Invalid verification code")
            }
        }
        (_, "/v1_0/raw") => (
            StatusCode::OK,
            [("content-type", "application/json")],
            RAW_BODY,
        )
            .into_response(),
        (_, "/v1_0/empty") => StatusCode::NO_CONTENT.into_response(),
        (_, "/v1_0/broken") => failure(StatusCode::INTERNAL_SERVER_ERROR, "Internal error"),
        (_, "/v1_0/slow") => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            ok(Value::Null)
        }
        (_, "/v1_0/echo") => ok(json!({ "method": method_name.clone(), "body": payload })),
        _ if !signed_in => failure(StatusCode::UNAUTHORIZED, "Token expired"),
        ("GET", "/v1_0/user/profile") => ok(json!({
            "id": "1",
            "name": "editor",
            "mobile": MOBILE,
            "photo": "http://img.newsdesk.test/editor.png",
            "gender": 0,
            "birthday": "1990-01-01"
        })),
        ("GET", "/v1_0/channels") => ok(json!({
            "channels": [{ "id": 0, "name": "recommended" }, { "id": 4, "name": "tech" }]
        })),
        ("GET", "/v1_0/mp/articles") => ok(json!({
            "page": 1,
            "per_page": 10,
            "total_count": 1,
            "results": [{ "id": "8", "title": "Hello", "status": 2 }]
        })),
        ("POST", "/v1_0/mp/articles") => ok(json!({ "id": "42" })),
        _ => failure(StatusCode::NOT_FOUND, "Not found"),
    }
}

/// Scratch directory removed on drop.
pub struct ScratchDir {
    pub path: PathBuf,
}

impl ScratchDir {
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!("newsdesk-test-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&path).expect("create scratch dir");
        Self { path }
    }

    pub fn storage_path(&self) -> PathBuf {
        self.path.join("storage.json")
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

pub fn config(base_url: &str, timeout_ms: u64, scratch: &ScratchDir) -> AppConfig {
    AppConfig::new(Some(base_url), timeout_ms, Some(scratch.storage_path().as_path())).expect("config")
}

pub fn console(api: &MockApi, scratch: &ScratchDir) -> Console {
    Console::new(&config(&api.base_url(), 5_000, scratch)).expect("console")
}
