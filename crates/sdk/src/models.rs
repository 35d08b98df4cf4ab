//! Typed views over normalized payloads and request bodies.
//!
//! Response models deserialize from the normalized (lowercase-first) form
//! produced by [`crate::normalize`]. Request models serialize to the
//! PascalCase bodies the server expects.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Result cap applied when a search does not ask for one.
pub const DEFAULT_MAX_RESULTS: u32 = 100;

/// Index metadata as returned by `GET /v1.0/indices/{id}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexInfo {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub in_memory: Option<bool>,
    #[serde(default)]
    pub created_utc: Option<String>,
    #[serde(default)]
    pub statistics: Option<Value>,
    #[serde(default, deserialize_with = "lenient_labels")]
    pub labels: Vec<String>,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: BTreeMap<String, String>,
}

/// Document metadata; `content` is only present on some server builds.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInfo {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub created_utc: Option<String>,
    #[serde(default, deserialize_with = "lenient_labels")]
    pub labels: Vec<String>,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(deserialize_with = "lenient_string")]
    pub document_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub score: f64,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub query: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<SearchResult>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_count: i64,
    #[serde(default = "default_max_results", deserialize_with = "max_results_or_default")]
    pub max_results: i64,
}

impl Default for SearchResponse {
    fn default() -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            total_count: 0,
            max_results: default_max_results(),
        }
    }
}

fn default_max_results() -> i64 {
    i64::from(DEFAULT_MAX_RESULTS)
}

fn max_results_or_default<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or_else(default_max_results))
}

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Render a scalar metadata value as text; `null` has no text form.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Labels may arrive as `null` or contain `null` entries; both are skipped.
fn lenient_labels<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(scalar_text)
        .collect())
}

/// Tags may arrive as `null`; tags whose value is `null` are dropped.
fn lenient_tags<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, value)| scalar_text(value).map(|text| (key, text)))
        .collect())
}

/// Accept identifiers sent either as strings or as bare numbers.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string identifier, found {other}"
        ))),
    }
}

/// Where an index keeps its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    #[default]
    MemoryOnly,
    PersistenceOnly,
    Hybrid,
}

impl StorageMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageMode::MemoryOnly => "MemoryOnly",
            StorageMode::PersistenceOnly => "PersistenceOnly",
            StorageMode::Hybrid => "Hybrid",
        }
    }
}

/// Body of `POST /v1.0/indices`.
///
/// Only `id` is required. `name` defaults to the id, `description` to the
/// empty string and `repository_filename` to `<id>.db`. Labels and tags are
/// sent only when non-empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateIndexRequest {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub repository_filename: Option<String>,
    pub in_memory: bool,
    pub storage_mode: StorageMode,
    pub enable_lemmatizer: bool,
    pub enable_stop_word_remover: bool,
    pub min_token_length: u32,
    pub max_token_length: u32,
    pub labels: Vec<String>,
    pub tags: BTreeMap<String, String>,
}

impl CreateIndexRequest {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_repository_filename(mut self, filename: impl Into<String>) -> Self {
        self.repository_filename = Some(filename.into());
        self
    }

    pub fn with_in_memory(mut self, in_memory: bool) -> Self {
        self.in_memory = in_memory;
        self
    }

    pub fn with_storage_mode(mut self, mode: StorageMode) -> Self {
        self.storage_mode = mode;
        self
    }

    pub fn with_lemmatizer(mut self, enabled: bool) -> Self {
        self.enable_lemmatizer = enabled;
        self
    }

    pub fn with_stop_word_remover(mut self, enabled: bool) -> Self {
        self.enable_stop_word_remover = enabled;
        self
    }

    pub fn with_token_length(mut self, min: u32, max: u32) -> Self {
        self.min_token_length = min;
        self.max_token_length = max;
        self
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tags<I, K, V>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.tags = tags.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    pub fn to_wire(&self) -> Value {
        let mut body = Map::new();
        body.insert("Id".into(), Value::from(self.id.as_str()));
        body.insert(
            "Name".into(),
            Value::from(self.name.as_deref().unwrap_or(&self.id)),
        );
        body.insert(
            "Description".into(),
            Value::from(self.description.as_deref().unwrap_or_default()),
        );
        body.insert(
            "RepositoryFilename".into(),
            Value::from(
                self.repository_filename
                    .clone()
                    .unwrap_or_else(|| format!("{}.db", self.id)),
            ),
        );
        body.insert("InMemory".into(), Value::Bool(self.in_memory));
        body.insert("StorageMode".into(), Value::from(self.storage_mode.as_str()));
        body.insert("EnableLemmatizer".into(), Value::Bool(self.enable_lemmatizer));
        body.insert(
            "EnableStopWordRemover".into(),
            Value::Bool(self.enable_stop_word_remover),
        );
        body.insert("MinTokenLength".into(), Value::from(self.min_token_length));
        body.insert("MaxTokenLength".into(), Value::from(self.max_token_length));
        insert_filters(&mut body, &self.labels, &self.tags);
        Value::Object(body)
    }
}

/// Body of `POST /v1.0/indices/{id}/documents`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AddDocumentRequest {
    pub content: String,
    pub id: Option<String>,
    pub labels: Vec<String>,
    pub tags: BTreeMap<String, String>,
}

impl AddDocumentRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Client-chosen document id. An empty id lets the server assign one.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tags<I, K, V>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.tags = tags.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    pub fn to_wire(&self) -> Value {
        let mut body = Map::new();
        body.insert("Content".into(), Value::from(self.content.as_str()));
        if let Some(id) = self.id.as_deref().filter(|id| !id.is_empty()) {
            body.insert("Id".into(), Value::from(id));
        }
        insert_filters(&mut body, &self.labels, &self.tags);
        Value::Object(body)
    }
}

/// Body of `POST /v1.0/indices/{id}/search`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub max_results: u32,
    pub labels: Vec<String>,
    pub tags: BTreeMap<String, String>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            max_results: DEFAULT_MAX_RESULTS,
            labels: Vec::new(),
            tags: BTreeMap::new(),
        }
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tags<I, K, V>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.tags = tags.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    pub fn to_wire(&self) -> Value {
        let mut body = Map::new();
        body.insert("Query".into(), Value::from(self.query.as_str()));
        body.insert("MaxResults".into(), Value::from(self.max_results));
        insert_filters(&mut body, &self.labels, &self.tags);
        Value::Object(body)
    }
}

/// `{"Labels": [...]}` for the label replacement endpoints.
pub fn labels_body(labels: &[String]) -> Value {
    let mut body = Map::new();
    body.insert("Labels".into(), Value::from(labels.to_vec()));
    Value::Object(body)
}

/// `{"Tags": {...}}` for the tag replacement endpoints.
pub fn tags_body(tags: &BTreeMap<String, String>) -> Value {
    let mut body = Map::new();
    body.insert("Tags".into(), tags_value(tags));
    Value::Object(body)
}

fn tags_value(tags: &BTreeMap<String, String>) -> Value {
    Value::Object(
        tags.iter()
            .map(|(k, v)| (k.clone(), Value::from(v.as_str())))
            .collect(),
    )
}

fn insert_filters(body: &mut Map<String, Value>, labels: &[String], tags: &BTreeMap<String, String>) {
    if !labels.is_empty() {
        body.insert("Labels".into(), Value::from(labels.to_vec()));
    }
    if !tags.is_empty() {
        body.insert("Tags".into(), tags_value(tags));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use serde_json::json;

    #[test]
    fn create_index_fills_defaults_from_id() {
        let body = CreateIndexRequest::new("idx1").to_wire();

        assert_eq!(
            body,
            json!({
                "Id": "idx1",
                "Name": "idx1",
                "Description": "",
                "RepositoryFilename": "idx1.db",
                "InMemory": false,
                "StorageMode": "MemoryOnly",
                "EnableLemmatizer": false,
                "EnableStopWordRemover": false,
                "MinTokenLength": 0,
                "MaxTokenLength": 0
            })
        );
    }

    #[test]
    fn create_index_sends_filters_only_when_present() {
        let body = CreateIndexRequest::new("idx")
            .with_name("Products")
            .with_storage_mode(StorageMode::Hybrid)
            .with_token_length(2, 32)
            .with_labels(["alpha", "beta"])
            .with_tags([("env", "test")])
            .to_wire();

        assert_eq!(body["Name"], json!("Products"));
        assert_eq!(body["StorageMode"], json!("Hybrid"));
        assert_eq!(body["MinTokenLength"], json!(2));
        assert_eq!(body["MaxTokenLength"], json!(32));
        assert_eq!(body["Labels"], json!(["alpha", "beta"]));
        assert_eq!(body["Tags"], json!({"env": "test"}));

        let bare = CreateIndexRequest::new("idx").with_labels(Vec::<String>::new()).to_wire();
        assert!(bare.get("Labels").is_none());
        assert!(bare.get("Tags").is_none());
    }

    #[test]
    fn add_document_omits_empty_id() {
        let body = AddDocumentRequest::new("hello").with_id("").to_wire();
        assert_eq!(body, json!({"Content": "hello"}));

        let body = AddDocumentRequest::new("hello")
            .with_id("doc-1")
            .with_labels(["x"])
            .to_wire();
        assert_eq!(body, json!({"Content": "hello", "Id": "doc-1", "Labels": ["x"]}));
    }

    #[test]
    fn search_request_defaults_to_one_hundred_results() {
        let body = SearchRequest::new("fox").to_wire();
        assert_eq!(body, json!({"Query": "fox", "MaxResults": 100}));

        let body = SearchRequest::new("fox")
            .with_max_results(2)
            .with_tags([("category", "animals")])
            .to_wire();
        assert_eq!(body["MaxResults"], json!(2));
        assert_eq!(body["Tags"], json!({"category": "animals"}));
    }

    #[test]
    fn replacement_bodies_keep_empty_collections() {
        assert_eq!(labels_body(&[]), json!({"Labels": []}));
        assert_eq!(tags_body(&BTreeMap::new()), json!({"Tags": {}}));
    }

    #[test]
    fn index_info_from_normalized_payload() {
        let data = normalize(json!({
            "Id": "idx",
            "Name": "Index",
            "Enabled": true,
            "InMemory": true,
            "CreatedUtc": "2026-01-01T00:00:00Z",
            "Statistics": {"DocumentCount": 2},
            "Labels": ["a"],
            "Tags": {"env": "test"}
        }));

        let info: IndexInfo = serde_json::from_value(data).unwrap();

        assert_eq!(info.id, "idx");
        assert_eq!(info.name.as_deref(), Some("Index"));
        assert_eq!(info.in_memory, Some(true));
        assert_eq!(info.statistics, Some(json!({"documentCount": 2})));
        assert_eq!(info.labels, vec!["a".to_string()]);
        assert_eq!(info.tags.get("env").map(String::as_str), Some("test"));
    }

    #[test]
    fn document_info_accepts_numeric_id() {
        let info: DocumentInfo = serde_json::from_value(json!({"id": 17})).unwrap();
        assert_eq!(info.id, "17");
        assert!(info.labels.is_empty());
    }

    #[test]
    fn search_response_defaults() {
        let response: SearchResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(response, SearchResponse::default());
        assert_eq!(response.max_results, 100);

        let response: SearchResponse = serde_json::from_value(normalize(json!({
            "Query": "fox",
            "Results": [{"DocumentId": "d1", "Score": 0.75, "Content": "quick fox"}],
            "TotalCount": 1,
            "MaxResults": 10
        })))
        .unwrap();
        assert_eq!(response.results[0].document_id, "d1");
        assert_eq!(response.results[0].score, 0.75);
        assert_eq!(response.total_count, 1);
        assert_eq!(response.max_results, 10);
    }

    #[test]
    fn missing_identifier_is_rejected() {
        assert!(serde_json::from_value::<IndexInfo>(json!({"name": "x"})).is_err());
    }

    #[test]
    fn null_labels_and_tags_read_as_empty() {
        let data = normalize(json!({"Id": "a", "Labels": null, "Tags": null}));

        let info: IndexInfo = serde_json::from_value(data).unwrap();

        assert_eq!(info.id, "a");
        assert!(info.labels.is_empty());
        assert!(info.tags.is_empty());
    }

    #[test]
    fn null_entries_inside_labels_and_tags_are_skipped() {
        let data = normalize(json!({
            "DocumentId": "d1",
            "Labels": ["keep", null],
            "Tags": {"k": null, "owner": "sdk", "rank": 3}
        }));

        let info: DocumentInfo = serde_json::from_value(data).unwrap();

        assert_eq!(info.id, "d1");
        assert_eq!(info.labels, vec!["keep".to_string()]);
        assert_eq!(
            info.tags,
            BTreeMap::from([
                ("owner".to_string(), "sdk".to_string()),
                ("rank".to_string(), "3".to_string()),
            ])
        );
    }

    #[test]
    fn null_search_fields_read_as_defaults() {
        let data = normalize(json!({
            "Query": null,
            "Results": null,
            "TotalCount": null,
            "MaxResults": null
        }));

        let response: SearchResponse = serde_json::from_value(data).unwrap();

        assert_eq!(response, SearchResponse::default());
    }

    #[test]
    fn null_score_reads_as_zero() {
        let result: SearchResult =
            serde_json::from_value(json!({"documentId": "d1", "score": null})).unwrap();
        assert_eq!(result.score, 0.0);
        assert!(result.content.is_none());
    }
}
