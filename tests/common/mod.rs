use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread;

use anyhow::{Context, Result};
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

/// One request as the mock API saw it.
#[derive(Clone, Debug)]
#[allow(dead_code)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: String,
    pub auth: Option<String>,
    pub body: String,
}

#[allow(dead_code)]
impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

#[derive(Default)]
struct Shared {
    routes: Mutex<HashMap<String, (u16, Value)>>,
    requests: Mutex<Vec<Recorded>>,
}

/// In-process stand-in for the admin REST API. Replies are canned per
/// `METHOD /path`; the query string is ignored when matching.
pub struct MockApi {
    pub base_url: String,
    shared: Arc<Shared>,
    shutdown: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Drop for MockApi {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[allow(dead_code)]
impl MockApi {
    /// Replies `status` with `body` to `route` (for example `GET /word/get-all`).
    pub fn reply(&self, route: &str, status: u16, body: Value) {
        self.shared
            .routes
            .lock()
            .unwrap()
            .insert(route.to_string(), (status, body));
    }

    /// `{success:true, data, pagination}` for a listing endpoint.
    pub fn reply_page(&self, route: &str, data: Value) {
        self.reply(
            route,
            200,
            json!({
                "success": true,
                "data": data,
                "pagination": {
                    "page": 1,
                    "limit": 10,
                    "totalPage": 1,
                    "hasNextPage": false,
                    "hasPrevPage": false,
                },
            }),
        );
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.shared.requests.lock().unwrap().clone()
    }

    /// Requests whose `METHOD /path` equals `route`.
    pub fn requests_to(&self, route: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| format!("{} {}", r.method, r.path) == route)
            .collect()
    }
}

async fn respond(
    State(shared): State<Arc<Shared>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let auth = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    shared.requests.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path: path.clone(),
        query: uri.query().unwrap_or("").to_string(),
        auth,
        body: String::from_utf8_lossy(&body).to_string(),
    });

    let key = format!("{} {}", method, path);
    let reply = shared.routes.lock().unwrap().get(&key).cloned();
    match reply {
        Some((status, body)) => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, axum::Json(body)).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            axum::Json(json!({ "success": false, "message": format!("no route {}", key) })),
        )
            .into_response(),
    }
}

pub fn spawn_api() -> Result<MockApi> {
    let shared = Arc::new(Shared::default());
    let (addr_tx, addr_rx) = std::sync::mpsc::channel();
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    let state = shared.clone();
    let handle = thread::spawn(move || {
        let rt = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(err) => {
                let _ = addr_tx.send(Err(err.to_string()));
                return;
            }
        };
        rt.block_on(async move {
            let listener = match tokio::net::TcpListener::bind("127.0.0.1:0").await {
                Ok(l) => l,
                Err(err) => {
                    let _ = addr_tx.send(Err(err.to_string()));
                    return;
                }
            };
            let addr = listener.local_addr().map_err(|e| e.to_string());
            let _ = addr_tx.send(addr);

            let app = Router::new().fallback(respond).with_state(state);
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
        });
    });

    let addr = addr_rx
        .recv()
        .context("mock api thread exited before binding")?
        .map_err(|e| anyhow::anyhow!("start mock api: {}", e))?;

    Ok(MockApi {
        base_url: format!("http://{}", addr),
        shared,
        shutdown: Some(shutdown_tx),
        handle: Some(handle),
    })
}

/// Canned admin profile with the default role.
#[allow(dead_code)]
pub fn admin_profile() -> Value {
    json!({
        "success": true,
        "data": { "_id": "a1", "name": "Root", "phone": "5550100", "role": "admin" },
    })
}
