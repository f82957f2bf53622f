//! In-process mock of the journaling backend.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::Json;
use axum::Router;
use serde_json::{json, Value};

use journal_mcp::{ClientConfig, JournalClient};

/// A request the mock backend received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub api_key: Option<String>,
    pub client: Option<String>,
    pub content_type: Option<String>,
}

fn record(req: &Request) -> RecordedRequest {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    RecordedRequest {
        method: req.method().to_string(),
        path: req.uri().path().to_string(),
        query: req.uri().query().map(str::to_string),
        api_key: header("x-api-key"),
        client: header("x-client"),
        content_type: header("content-type"),
    }
}

pub struct MockBackend {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockBackend {
    /// Serve `routes` under `/api/v1` on an ephemeral port.
    pub async fn spawn(routes: Router) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = requests.clone();

        let app = Router::new()
            .nest("/api/v1", routes)
            .layer(middleware::from_fn(move |req: Request, next: Next| {
                let log = log.clone();
                async move {
                    let recorded = record(&req);
                    log.lock().unwrap().push(recorded);
                    next.run(req).await
                }
            }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind to ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock backend");
        });

        Self {
            base_url: format!("http://{}/api/v1", addr),
            requests,
        }
    }

    pub fn client(&self) -> JournalClient {
        JournalClient::new(&ClientConfig::new("test-key").with_base_url(&self.base_url))
            .expect("client")
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

/// A URL nothing is listening on.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind to ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}/api/v1", addr)
}

/// A URL whose listener accepts connections and closes them without replying.
pub async fn hangup_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind to ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            drop(socket);
        }
    });
    format!("http://{}/api/v1", addr)
}

pub fn success(data: Value) -> Json<Value> {
    Json(json!({ "status": "success", "data": data }))
}

pub fn entry(id: &str, content: &str, status: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Entry {}", id),
        "content": content,
        "mood": null,
        "tags": [],
        "status": status,
        "date": "2024-03-01",
        "createdAt": "2024-03-01T08:00:00Z",
        "updatedAt": "2024-03-01T08:00:00Z"
    })
}

pub fn page(items: Vec<Value>, total: usize, limit: usize, offset: usize) -> Value {
    let has_more = offset + items.len() < total;
    json!({
        "items": items,
        "pagination": {
            "total": total,
            "limit": limit,
            "offset": offset,
            "hasMore": has_more
        }
    })
}
