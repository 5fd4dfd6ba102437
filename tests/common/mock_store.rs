//! Mock hosted store
//!
//! A small in-memory PostgREST lookalike serving the `entries` and `notes`
//! tables. Only the query shapes the catalog client issues are understood.

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use super::constants::TEST_STORE_API_KEY;

#[derive(Default)]
struct Tables {
    entries: BTreeMap<u64, Value>,
    notes: Vec<Value>,
}

struct StoreState {
    tables: Mutex<Tables>,
    upsert_hits: AtomicUsize,
    count_hits: AtomicUsize,
    fail_count: bool,
}

/// Running mock store. Shuts down when dropped.
pub struct MockRestStore {
    pub base_url: String,
    state: Arc<StoreState>,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl MockRestStore {
    pub async fn spawn() -> Self {
        Self::spawn_inner(false).await
    }

    /// Spawns a store whose exact-count request answers 503.
    pub async fn spawn_with_failing_count() -> Self {
        Self::spawn_inner(true).await
    }

    async fn spawn_inner(fail_count: bool) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let state = Arc::new(StoreState {
            tables: Mutex::new(Tables::default()),
            upsert_hits: AtomicUsize::new(0),
            count_hits: AtomicUsize::new(0),
            fail_count,
        });

        let app = Router::new()
            .route("/rest/v1/entries", get(get_entries).post(post_entries))
            .route("/rest/v1/notes", get(get_notes).post(post_notes))
            .with_state(state.clone());

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Mock store failed");
        });

        Self {
            base_url,
            state,
            _shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn upsert_hits(&self) -> usize {
        self.state.upsert_hits.load(Ordering::SeqCst)
    }

    pub fn count_hits(&self) -> usize {
        self.state.count_hits.load(Ordering::SeqCst)
    }

    pub fn entry_count(&self) -> usize {
        self.state.tables.lock().unwrap().entries.len()
    }

    /// Seeds rows directly, bypassing HTTP.
    pub fn seed_entries(&self, rows: impl IntoIterator<Item = Value>) {
        let mut tables = self.state.tables.lock().unwrap();
        for row in rows {
            let id = row["id"].as_u64().expect("seeded row needs an id");
            tables.entries.insert(id, row);
        }
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    let apikey = headers.get("apikey").and_then(|v| v.to_str().ok());
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    apikey == Some(TEST_STORE_API_KEY)
        && bearer == Some(format!("Bearer {}", TEST_STORE_API_KEY).as_str())
}

fn prefer(headers: &HeaderMap) -> String {
    headers
        .get("Prefer")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn eq_filter(params: &HashMap<String, String>, column: &str) -> Option<u64> {
    params
        .get(column)?
        .strip_prefix("eq.")
        .and_then(|v| v.parse().ok())
}

fn project(row: &Value, select: Option<&String>) -> Value {
    match select.map(String::as_str) {
        None | Some("*") => row.clone(),
        Some(columns) => {
            let projected: serde_json::Map<String, Value> = columns
                .split(',')
                .map(|c| (c.to_string(), row[c].clone()))
                .collect();
            Value::Object(projected)
        }
    }
}

async fn get_entries(
    State(state): State<Arc<StoreState>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    if prefer(&headers).contains("count=exact") {
        state.count_hits.fetch_add(1, Ordering::SeqCst);
        if state.fail_count {
            return (StatusCode::SERVICE_UNAVAILABLE, "count unavailable").into_response();
        }
        let total = state.tables.lock().unwrap().entries.len();
        let range = if total == 0 {
            "*/0".to_string()
        } else {
            format!("0-0/{}", total)
        };
        let mut response = Json(Value::Array(vec![])).into_response();
        response.headers_mut().insert(
            header::CONTENT_RANGE,
            HeaderValue::from_str(&range).expect("valid header"),
        );
        return response;
    }

    let tables = state.tables.lock().unwrap();
    let select = params.get("select");
    // BTreeMap iteration is id ascending, which is the only order requested.
    let rows: Vec<Value> = match eq_filter(&params, "id") {
        Some(id) => tables
            .entries
            .get(&id)
            .map(|row| project(row, select))
            .into_iter()
            .collect(),
        None => tables.entries.values().map(|row| project(row, select)).collect(),
    };
    Json(Value::Array(rows)).into_response()
}

async fn post_entries(
    State(state): State<Arc<StoreState>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if params.get("on_conflict").map(String::as_str) != Some("id")
        || !prefer(&headers).contains("resolution=merge-duplicates")
    {
        return (StatusCode::CONFLICT, "duplicate key value").into_response();
    }
    let Value::Array(rows) = body else {
        return (StatusCode::BAD_REQUEST, "expected an array").into_response();
    };

    state.upsert_hits.fetch_add(1, Ordering::SeqCst);
    let mut tables = state.tables.lock().unwrap();
    for row in rows {
        let Some(id) = row["id"].as_u64() else {
            return (StatusCode::BAD_REQUEST, "row without id").into_response();
        };
        tables.entries.insert(id, row);
    }
    StatusCode::CREATED.into_response()
}

async fn get_notes(
    State(state): State<Arc<StoreState>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let Some(entry_id) = eq_filter(&params, "entry_id") else {
        return (StatusCode::BAD_REQUEST, "entry_id filter required").into_response();
    };

    let tables = state.tables.lock().unwrap();
    let mut rows: Vec<Value> = tables
        .notes
        .iter()
        .filter(|n| n["entry_id"].as_u64() == Some(entry_id))
        .cloned()
        .collect();
    if params.get("order").map(String::as_str) == Some("created_at.desc") {
        // Insertion order doubles as creation order.
        rows.reverse();
    }
    Json(Value::Array(rows)).into_response()
}

async fn post_notes(
    State(state): State<Arc<StoreState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let Some(Value::Object(mut note)) = body.as_array().and_then(|rows| rows.first()).cloned()
    else {
        return (StatusCode::BAD_REQUEST, "expected one note").into_response();
    };

    let mut tables = state.tables.lock().unwrap();
    let entry_id = note.get("entry_id").and_then(Value::as_u64);
    if !entry_id.is_some_and(|id| tables.entries.contains_key(&id)) {
        return (StatusCode::CONFLICT, "violates foreign key constraint").into_response();
    }

    let id = format!("note-{}", tables.notes.len() + 1);
    note.insert("id".to_string(), json!(id));
    note.insert(
        "created_at".to_string(),
        json!(chrono::Utc::now().to_rfc3339()),
    );
    for column in ["location", "latitude", "longitude"] {
        note.entry(column.to_string()).or_insert(Value::Null);
    }
    let saved = Value::Object(note);
    tables.notes.push(saved.clone());

    if prefer(&headers).contains("return=representation") {
        (StatusCode::CREATED, Json(json!([saved]))).into_response()
    } else {
        StatusCode::CREATED.into_response()
    }
}
