//! In-process fake Verbex server shared by the integration suites.
//!
//! Answers with PascalCase envelopes like current server builds, except the
//! root health route which answers camelCase like older ones. State lives in
//! memory for the lifetime of one [`FakeServer`].

#![allow(dead_code)]

use std::collections::{BTreeMap, HashSet};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const ACCESS_KEY: &str = "verbexadmin";
pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "password";
pub const VERSION: &str = "1.0.0";

#[derive(Debug, Clone)]
struct Document {
    id: String,
    content: String,
    labels: Vec<String>,
    tags: BTreeMap<String, String>,
    created_utc: String,
}

impl Document {
    fn to_wire(&self) -> Value {
        json!({
            "DocumentId": self.id,
            "ContentLength": self.content.len(),
            "CreatedUtc": self.created_utc,
            "Labels": self.labels,
            "Tags": self.tags,
        })
    }

    fn has_labels(&self, wanted: &[String]) -> bool {
        wanted
            .iter()
            .all(|w| self.labels.iter().any(|l| l.eq_ignore_ascii_case(w)))
    }

    fn has_tags(&self, wanted: &BTreeMap<String, String>) -> bool {
        wanted.iter().all(|(k, v)| self.tags.get(k) == Some(v))
    }
}

#[derive(Debug, Clone)]
struct Index {
    id: String,
    name: String,
    description: String,
    in_memory: bool,
    created_utc: String,
    labels: Vec<String>,
    tags: BTreeMap<String, String>,
    documents: Vec<Document>,
}

impl Index {
    fn to_wire(&self) -> Value {
        json!({
            "Id": self.id,
            "Name": self.name,
            "Description": self.description,
            "Enabled": true,
            "InMemory": self.in_memory,
            "CreatedUtc": self.created_utc,
            "Labels": self.labels,
            "Tags": self.tags,
            "Statistics": {"DocumentCount": self.documents.len()},
        })
    }

    fn document(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    fn document_mut(&mut self, id: &str) -> Option<&mut Document> {
        self.documents.iter_mut().find(|d| d.id == id)
    }
}

#[derive(Debug, Default)]
struct Store {
    indices: Vec<Index>,
    tokens: HashSet<String>,
}

impl Store {
    fn authorize(&self, headers: &HeaderMap) -> Result<(), Response> {
        let token = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));
        match token {
            Some(token) if token == ACCESS_KEY || self.tokens.contains(token) => Ok(()),
            _ => Err(failure(StatusCode::UNAUTHORIZED, "Invalid or missing bearer token")),
        }
    }

    fn index(&self, id: &str) -> Result<&Index, Response> {
        self.indices
            .iter()
            .find(|i| i.id == id)
            .ok_or_else(|| failure(StatusCode::NOT_FOUND, "Index not found"))
    }

    fn index_mut(&mut self, id: &str) -> Result<&mut Index, Response> {
        self.indices
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| failure(StatusCode::NOT_FOUND, "Index not found"))
    }
}

type Shared = Arc<Mutex<Store>>;

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

fn envelope(status: StatusCode, data: Option<Value>, error: Option<&str>) -> Response {
    let body = json!({
        "Guid": uuid::Uuid::new_v4().to_string(),
        "Success": status.is_success(),
        "TimestampUtc": now(),
        "StatusCode": status.as_u16(),
        "ErrorMessage": error,
        "Data": data,
        "ProcessingTimeMs": 0.25,
    });
    (status, Json(body)).into_response()
}

fn ok(data: Value) -> Response {
    envelope(StatusCode::OK, Some(data), None)
}

fn created(data: Value) -> Response {
    envelope(StatusCode::CREATED, Some(data), None)
}

fn failure(status: StatusCode, message: &str) -> Response {
    envelope(status, None, Some(message))
}

fn labels_of(body: &Value) -> Option<Vec<String>> {
    body.get("Labels").and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    })
}

fn tags_of(body: &Value) -> Option<BTreeMap<String, String>> {
    body.get("Tags").and_then(Value::as_object).map(|map: &Map<String, Value>| {
        map.iter()
            .filter_map(|(k, v)| v.as_str().map(|v| (k.clone(), v.to_string())))
            .collect()
    })
}

fn terms(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

macro_rules! try_response {
    ($expr:expr) => {
        match $expr {
            Ok(value) => value,
            Err(response) => return response,
        }
    };
}

async fn root_health() -> Response {
    let body = json!({
        "guid": uuid::Uuid::new_v4().to_string(),
        "success": true,
        "timestampUtc": now(),
        "statusCode": 200,
        "data": {"status": "Healthy", "version": VERSION, "timestamp": now()},
    });
    (StatusCode::OK, Json(body)).into_response()
}

async fn health() -> Response {
    ok(json!({"Status": "Healthy", "Version": VERSION, "Timestamp": now()}))
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let username = body.get("Username").and_then(Value::as_str);
    let password = body.get("Password").and_then(Value::as_str);
    if username != Some(USERNAME) || password != Some(PASSWORD) {
        return failure(StatusCode::UNAUTHORIZED, "Invalid username or password");
    }
    let token = uuid::Uuid::new_v4().to_string();
    state.lock().unwrap().tokens.insert(token.clone());
    ok(json!({"Token": token, "Username": USERNAME}))
}

async fn validate(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let store = state.lock().unwrap();
    try_response!(store.authorize(&headers));
    ok(json!({"Valid": true}))
}

async fn list_indices(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let store = state.lock().unwrap();
    try_response!(store.authorize(&headers));
    let indices: Vec<Value> = store.indices.iter().map(Index::to_wire).collect();
    ok(json!({"Indices": indices, "Count": store.indices.len()}))
}

async fn create_index(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut store = state.lock().unwrap();
    try_response!(store.authorize(&headers));
    let Some(id) = body.get("Id").and_then(Value::as_str).filter(|id| !id.is_empty()) else {
        return failure(StatusCode::BAD_REQUEST, "Index id is required");
    };
    if store.indices.iter().any(|i| i.id == id) {
        return failure(StatusCode::CONFLICT, "Index already exists");
    }
    let index = Index {
        id: id.to_string(),
        name: body.get("Name").and_then(Value::as_str).unwrap_or(id).to_string(),
        description: body
            .get("Description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        in_memory: body.get("InMemory").and_then(Value::as_bool).unwrap_or(false),
        created_utc: now(),
        labels: labels_of(&body).unwrap_or_default(),
        tags: tags_of(&body).unwrap_or_default(),
        documents: Vec::new(),
    };
    let wire = index.to_wire();
    store.indices.push(index);
    created(json!({"Message": "Index created successfully", "Index": wire}))
}

async fn get_index(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(index_id): Path<String>,
) -> Response {
    let store = state.lock().unwrap();
    try_response!(store.authorize(&headers));
    ok(try_response!(store.index(&index_id)).to_wire())
}

async fn delete_index(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(index_id): Path<String>,
) -> Response {
    let mut store = state.lock().unwrap();
    try_response!(store.authorize(&headers));
    try_response!(store.index(&index_id));
    store.indices.retain(|i| i.id != index_id);
    ok(json!({"IndexId": index_id, "Message": "Index deleted successfully"}))
}

async fn update_index_labels(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(index_id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut store = state.lock().unwrap();
    try_response!(store.authorize(&headers));
    let Some(labels) = labels_of(&body) else {
        return failure(StatusCode::BAD_REQUEST, "Labels are required");
    };
    let index = try_response!(store.index_mut(&index_id));
    index.labels = labels;
    ok(json!({"IndexId": index_id, "Labels": index.labels, "Message": "Labels updated"}))
}

async fn update_index_tags(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(index_id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut store = state.lock().unwrap();
    try_response!(store.authorize(&headers));
    let Some(tags) = tags_of(&body) else {
        return failure(StatusCode::BAD_REQUEST, "Tags are required");
    };
    let index = try_response!(store.index_mut(&index_id));
    index.tags = tags;
    ok(json!({"IndexId": index_id, "Tags": index.tags, "Message": "Tags updated"}))
}

async fn list_documents(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(index_id): Path<String>,
) -> Response {
    let store = state.lock().unwrap();
    try_response!(store.authorize(&headers));
    let index = try_response!(store.index(&index_id));
    let documents: Vec<Value> = index.documents.iter().map(Document::to_wire).collect();
    ok(json!({"Documents": documents, "Count": index.documents.len()}))
}

async fn add_document(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(index_id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut store = state.lock().unwrap();
    try_response!(store.authorize(&headers));
    let index = try_response!(store.index_mut(&index_id));
    let Some(content) = body.get("Content").and_then(Value::as_str).filter(|c| !c.trim().is_empty())
    else {
        return failure(StatusCode::BAD_REQUEST, "Content is required");
    };
    let id = body
        .get("Id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    if index.document(&id).is_some() {
        return failure(StatusCode::CONFLICT, "Document already exists");
    }
    index.documents.push(Document {
        id: id.clone(),
        content: content.to_string(),
        labels: labels_of(&body).unwrap_or_default(),
        tags: tags_of(&body).unwrap_or_default(),
        created_utc: now(),
    });
    created(json!({"DocumentId": id, "Message": "Document added successfully"}))
}

async fn get_document(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path((index_id, document_id)): Path<(String, String)>,
) -> Response {
    let store = state.lock().unwrap();
    try_response!(store.authorize(&headers));
    let index = try_response!(store.index(&index_id));
    match index.document(&document_id) {
        Some(document) => ok(document.to_wire()),
        None => failure(StatusCode::NOT_FOUND, "Document not found"),
    }
}

async fn delete_document(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path((index_id, document_id)): Path<(String, String)>,
) -> Response {
    let mut store = state.lock().unwrap();
    try_response!(store.authorize(&headers));
    let index = try_response!(store.index_mut(&index_id));
    if index.document(&document_id).is_none() {
        return failure(StatusCode::NOT_FOUND, "Document not found");
    }
    index.documents.retain(|d| d.id != document_id);
    ok(json!({"DocumentId": document_id, "Message": "Document deleted successfully"}))
}

async fn update_document_labels(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path((index_id, document_id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    let mut store = state.lock().unwrap();
    try_response!(store.authorize(&headers));
    let Some(labels) = labels_of(&body) else {
        return failure(StatusCode::BAD_REQUEST, "Labels are required");
    };
    let index = try_response!(store.index_mut(&index_id));
    let Some(document) = index.document_mut(&document_id) else {
        return failure(StatusCode::NOT_FOUND, "Document not found");
    };
    document.labels = labels;
    ok(json!({"DocumentId": document_id, "Labels": document.labels, "Message": "Labels updated"}))
}

async fn update_document_tags(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path((index_id, document_id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    let mut store = state.lock().unwrap();
    try_response!(store.authorize(&headers));
    let Some(tags) = tags_of(&body) else {
        return failure(StatusCode::BAD_REQUEST, "Tags are required");
    };
    let index = try_response!(store.index_mut(&index_id));
    let Some(document) = index.document_mut(&document_id) else {
        return failure(StatusCode::NOT_FOUND, "Document not found");
    };
    document.tags = tags;
    ok(json!({"DocumentId": document_id, "Tags": document.tags, "Message": "Tags updated"}))
}

async fn search(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(index_id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let store = state.lock().unwrap();
    try_response!(store.authorize(&headers));
    let index = try_response!(store.index(&index_id));
    let Some(query) = body.get("Query").and_then(Value::as_str) else {
        return failure(StatusCode::BAD_REQUEST, "Query is required");
    };
    let max_results = body.get("MaxResults").and_then(Value::as_u64).unwrap_or(100) as usize;
    let labels = labels_of(&body).unwrap_or_default();
    let tags = tags_of(&body).unwrap_or_default();
    let wanted = terms(query);

    let mut hits: Vec<(f64, &Document)> = index
        .documents
        .iter()
        .filter(|d| d.has_labels(&labels) && d.has_tags(&tags))
        .filter_map(|d| {
            let doc_terms = terms(&d.content);
            let matched = doc_terms.iter().filter(|t| wanted.contains(t)).count();
            (matched > 0).then(|| (matched as f64 / doc_terms.len() as f64, d))
        })
        .collect();
    hits.sort_by(|a, b| b.0.total_cmp(&a.0));

    let total = hits.len();
    let results: Vec<Value> = hits
        .into_iter()
        .take(max_results)
        .map(|(score, d)| json!({"DocumentId": d.id, "Score": score, "Content": d.content}))
        .collect();
    ok(json!({
        "Query": query,
        "Results": results,
        "TotalCount": total,
        "MaxResults": max_results,
    }))
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/", get(root_health))
        .route("/v1.0/health", get(health))
        .route("/v1.0/auth/login", post(login))
        .route("/v1.0/auth/validate", get(validate))
        .route("/v1.0/indices", get(list_indices).post(create_index))
        .route("/v1.0/indices/{index_id}", get(get_index).delete(delete_index))
        .route("/v1.0/indices/{index_id}/labels", put(update_index_labels))
        .route("/v1.0/indices/{index_id}/tags", put(update_index_tags))
        .route("/v1.0/indices/{index_id}/search", post(search))
        .route(
            "/v1.0/indices/{index_id}/documents",
            get(list_documents).post(add_document),
        )
        .route(
            "/v1.0/indices/{index_id}/documents/{document_id}",
            get(get_document).delete(delete_document),
        )
        .route(
            "/v1.0/indices/{index_id}/documents/{document_id}/labels",
            put(update_document_labels),
        )
        .route(
            "/v1.0/indices/{index_id}/documents/{document_id}/tags",
            put(update_document_tags),
        )
        .with_state(state)
}

/// A running fake server; aborted on drop.
pub struct FakeServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl FakeServer {
    pub async fn start() -> Self {
        Self::serve(router(Shared::default())).await
    }

    /// Server answering every request with `status` and a non-JSON body.
    pub async fn plain_text(status: StatusCode, body: &'static str) -> Self {
        Self::serve(Router::new().fallback(move || async move { (status, body) })).await
    }

    async fn serve(app: Router) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self { addr, handle }
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for FakeServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Endpoint of a port nothing listens on.
pub async fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
