//! In-process mock of the maintenance backend.
//!
//! Serves the REST endpoints the client consumes from an in-memory store so
//! integration tests need no external infrastructure. Records are stored as
//! raw JSON; the server stamps `id`, `created_at` and `updated_at` the way the
//! real backend does, and reports missing records as `{"detail": "... not found"}`.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use maintenance_console::{ApiClient, ClientConfig};

pub const CREATED_AT: &str = "2025-01-15T10:00:00";
pub const UPDATED_AT: &str = "2025-01-16T08:30:00";

/// (collection path segment, display name, unique business key)
const COLLECTIONS: &[(&str, &str, Option<&str>)] = &[
    ("assets", "Asset", Some("asset_id")),
    ("work-orders", "Work order", Some("wo_number")),
    ("inventory", "Inventory item", Some("part_number")),
    ("pm-templates", "PM template", None),
    ("locations", "Location", None),
];

fn collection(name: &str) -> Option<(&'static str, Option<&'static str>)> {
    COLLECTIONS
        .iter()
        .find(|(path, _, _)| *path == name)
        .map(|(_, display, key)| (*display, *key))
}

#[derive(Default)]
struct Store {
    records: Mutex<HashMap<String, Vec<Value>>>,
    next_id: AtomicI64,
    requests: AtomicUsize,
    queries: Mutex<Vec<String>>,
}

/// Handle to a running mock backend.
#[derive(Clone, Default)]
pub struct MockBackend {
    store: Arc<Store>,
    base_url: String,
}

impl MockBackend {
    /// Start the mock on an ephemeral local port.
    pub async fn start() -> Self {
        let mut backend = Self::default();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        backend.base_url = format!("http://{}", listener.local_addr().expect("local addr"));

        let app = router(backend.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock backend crashed");
        });
        backend
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(ClientConfig::new(&self.base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Number of HTTP requests served so far.
    pub fn request_count(&self) -> usize {
        self.store.requests.load(Ordering::SeqCst)
    }

    /// Raw query string of the most recent request ("" when none was sent).
    pub fn last_query(&self) -> String {
        self.store
            .queries
            .lock()
            .unwrap()
            .last()
            .cloned()
            .unwrap_or_default()
    }

    /// Insert a record directly, bypassing the HTTP surface.
    pub fn seed(&self, collection: &str, mut record: Value) -> i64 {
        let id = self.next_id();
        record["id"] = json!(id);
        record["created_at"] = json!(CREATED_AT);
        self.records_mut(collection, |records| records.push(record));
        id
    }

    fn next_id(&self) -> i64 {
        self.store.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn records(&self, collection: &str) -> Vec<Value> {
        self.store
            .records
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    fn records_mut<T>(&self, collection: &str, f: impl FnOnce(&mut Vec<Value>) -> T) -> T {
        let mut records = self.store.records.lock().unwrap();
        f(records.entry(collection.to_string()).or_default())
    }
}

/// Serve a single connection that answers with `status_line`, promises a
/// longer body than it sends, then hangs up. Returns the base URL.
pub async fn truncated_response_server(status_line: &'static str) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind truncating server");
    let base_url = format!("http://{}", listener.local_addr().expect("local addr"));

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept failed");
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.expect("read failed");
            if n == 0 {
                return;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: 200\r\n\r\n{{\"deta",
            status_line
        );
        socket.write_all(response.as_bytes()).await.expect("write failed");
        let _ = socket.shutdown().await;
    });

    base_url
}

fn router(backend: MockBackend) -> Router {
    Router::new()
        .route("/stats/dashboard", get(dashboard))
        .route("/pm-templates/generate-work-orders", post(generate_work_orders))
        .route("/debug/headers", get(echo_headers))
        .route("/debug/garbage", get(garbage))
        .route("/{collection}", get(list).post(create))
        .route("/{collection}/{id}", get(fetch).put(update).delete(remove))
        .layer(middleware::from_fn_with_state(backend.clone(), track))
        .with_state(backend)
}

async fn track(State(backend): State<MockBackend>, req: Request, next: Next) -> Response {
    backend.store.requests.fetch_add(1, Ordering::SeqCst);
    let query = req.uri().query().unwrap_or_default().to_string();
    backend.store.queries.lock().unwrap().push(query);
    next.run(req).await
}

// ============================================================================
// Error responses
// ============================================================================

fn detail(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "detail": message.into() }))).into_response()
}

/// A non-JSON 404, like a reverse proxy would return for an unknown path.
fn plain_not_found() -> Response {
    (StatusCode::NOT_FOUND, "<html><body>404 Not Found</body></html>").into_response()
}

// ============================================================================
// Collection handlers
// ============================================================================

async fn list(
    State(backend): State<MockBackend>,
    Path(name): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if collection(&name).is_none() {
        return plain_not_found();
    }
    let records: Vec<Value> = backend
        .records(&name)
        .into_iter()
        .filter(|record| params.iter().all(|(key, value)| matches_param(record, key, value)))
        .collect();
    Json(records).into_response()
}

fn matches_param(record: &Value, key: &str, value: &str) -> bool {
    if key == "search" {
        let needle = value.to_lowercase();
        return ["name", "asset_id", "category"].iter().any(|field| {
            record[*field]
                .as_str()
                .is_some_and(|text| text.to_lowercase().contains(&needle))
        });
    }
    record[key].as_str() == Some(value)
}

async fn create(
    State(backend): State<MockBackend>,
    Path(name): Path<String>,
    Json(mut body): Json<Value>,
) -> Response {
    let Some((display, key)) = collection(&name) else {
        return plain_not_found();
    };

    if let Some(key) = key {
        let duplicate = backend
            .records(&name)
            .iter()
            .any(|record| record[key] == body[key]);
        if duplicate {
            return detail(StatusCode::BAD_REQUEST, format!("{} with this {} already exists", display, key));
        }
    }

    body["id"] = json!(backend.next_id());
    body["created_at"] = json!(CREATED_AT);
    body["updated_at"] = json!(CREATED_AT);
    backend.records_mut(&name, |records| records.push(body.clone()));
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn fetch(State(backend): State<MockBackend>, Path((name, id)): Path<(String, i64)>) -> Response {
    let Some((display, _)) = collection(&name) else {
        return plain_not_found();
    };
    match backend.records(&name).into_iter().find(|record| record["id"] == json!(id)) {
        Some(record) => Json(record).into_response(),
        None => detail(StatusCode::NOT_FOUND, format!("{} not found", display)),
    }
}

async fn update(
    State(backend): State<MockBackend>,
    Path((name, id)): Path<(String, i64)>,
    Json(mut body): Json<Value>,
) -> Response {
    let Some((display, _)) = collection(&name) else {
        return plain_not_found();
    };
    let updated = backend.records_mut(&name, |records| {
        let existing = records.iter_mut().find(|record| record["id"] == json!(id))?;
        body["id"] = json!(id);
        body["created_at"] = existing["created_at"].clone();
        body["updated_at"] = json!(UPDATED_AT);
        *existing = body;
        Some(existing.clone())
    });
    match updated {
        Some(record) => Json(record).into_response(),
        None => detail(StatusCode::NOT_FOUND, format!("{} not found", display)),
    }
}

async fn remove(State(backend): State<MockBackend>, Path((name, id)): Path<(String, i64)>) -> Response {
    let Some((display, _)) = collection(&name) else {
        return plain_not_found();
    };
    let removed = backend.records_mut(&name, |records| {
        let before = records.len();
        records.retain(|record| record["id"] != json!(id));
        records.len() != before
    });
    if removed {
        StatusCode::NO_CONTENT.into_response()
    } else {
        detail(StatusCode::NOT_FOUND, format!("{} not found", display))
    }
}

// ============================================================================
// Special endpoints
// ============================================================================

async fn dashboard(State(backend): State<MockBackend>) -> Json<Value> {
    let assets = backend.records("assets");
    let work_orders = backend.records("work-orders");
    let inventory = backend.records("inventory");
    let templates = backend.records("pm-templates");

    let count = |records: &[Value], field: &str, value: &str| {
        records.iter().filter(|r| r[field].as_str() == Some(value)).count()
    };
    let low_stock = inventory
        .iter()
        .filter(|item| item["stock_on_hand"].as_i64() <= item["min_stock"].as_i64())
        .count();
    // every active template counts as due within the week
    let due = templates.iter().filter(|t| t["is_active"] == json!(true)).count();

    Json(json!({
        "total_assets": assets.len(),
        "active_assets": count(&assets[..], "status", "Active"),
        "total_work_orders": work_orders.len(),
        "open_work_orders": count(&work_orders[..], "status", "Open"),
        "in_progress_work_orders": count(&work_orders[..], "status", "In Progress"),
        "low_stock_items": low_stock,
        "due_pms_next_7_days": due,
    }))
}

async fn generate_work_orders(State(backend): State<MockBackend>) -> Json<Value> {
    let active: Vec<Value> = backend
        .records("pm-templates")
        .into_iter()
        .filter(|t| t["is_active"] == json!(true))
        .collect();

    for template in &active {
        let template_id = template["id"].as_i64().unwrap_or_default();
        let id = backend.next_id();
        let work_order = json!({
            "id": id,
            "wo_number": format!("PM-{}-{}", template_id, id),
            "summary": template["wo_summary_template"],
            "priority": template["default_priority"],
            "status": "Open",
            "time_spent_hours": 0.0,
            "pm_template_id": template_id,
            "created_at": CREATED_AT,
        });
        backend.records_mut("work-orders", |records| records.push(work_order));
    }

    Json(json!({ "generated_count": active.len() }))
}

async fn echo_headers(headers: HeaderMap) -> Json<Value> {
    let map: serde_json::Map<String, Value> = headers
        .iter()
        .map(|(name, value)| (name.to_string(), json!(value.to_str().unwrap_or_default())))
        .collect();
    Json(Value::Object(map))
}

async fn garbage() -> &'static str {
    "definitely { not json"
}
