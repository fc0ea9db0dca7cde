#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use chrono::{DateTime, TimeZone, Utc};
use quarry::config::ApiConfig;
use tempfile::TempDir;

/// 2026-02-24T09:05:00Z
pub fn fixed_clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 24, 9, 5, 0).unwrap()
}

/// A temporary workspace with `research/<topic>/TEMPLATE.md` holding `text`.
pub fn workspace_with_template(topic: &str, text: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("research").join(topic);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("TEMPLATE.md"), text).unwrap();
    tmp
}

/// Every path under `root`, sorted, for before/after comparisons.
pub fn snapshot(root: &Path) -> Vec<PathBuf> {
    fn walk(dir: &Path, out: &mut Vec<PathBuf>) {
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            out.push(path.clone());
            if path.is_dir() {
                walk(&path, out);
            }
        }
    }
    let mut out = Vec::new();
    if root.exists() {
        walk(root, &mut out);
    }
    out.sort();
    out
}

/// A request the stub API received.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

#[derive(Clone, Default)]
struct StubState {
    routes: Arc<Mutex<HashMap<String, VecDeque<(u16, String)>>>>,
    seen: Arc<Mutex<Vec<Recorded>>>,
}

/// In-process stand-in for the research API.
pub struct StubApi {
    pub base_url: String,
    seen: Arc<Mutex<Vec<Recorded>>>,
}

impl StubApi {
    /// Serve `(path, status, body)` routes. Repeating a path queues responses in
    /// order; the last one keeps being served. Unknown paths return 404.
    pub async fn start(routes: &[(&str, u16, &str)]) -> Self {
        let mut table: HashMap<String, VecDeque<(u16, String)>> = HashMap::new();
        for (path, status, body) in routes {
            table
                .entry(path.to_string())
                .or_default()
                .push_back((*status, body.to_string()));
        }
        let state = StubState {
            routes: Arc::new(Mutex::new(table)),
            seen: Arc::default(),
        };
        let seen = Arc::clone(&state.seen);

        let app = Router::new().fallback(respond).with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            seen,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.seen.lock().unwrap().clone()
    }

    /// An `ApiConfig` pointed at this stub with a test key.
    pub fn config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url.clone(),
            api_key: Some("pk-test".into()),
            timeout_secs: 5,
            ..Default::default()
        }
    }
}

async fn respond(
    State(state): State<StubState>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let path = uri.path().to_string();
    state.seen.lock().unwrap().push(Recorded {
        path: path.clone(),
        headers,
        body: serde_json::from_str(&body).unwrap_or(serde_json::Value::Null),
    });

    let (status, body) = {
        let mut routes = state.routes.lock().unwrap();
        match routes.get_mut(&path) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue.front().cloned().unwrap(),
            None => (404, r#"{"error":"not found"}"#.to_string()),
        }
    };
    (
        StatusCode::from_u16(status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
}
