use std::collections::BTreeMap;
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::config::ClientConfig;
use crate::envelope::ResponseEnvelope;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    labels_body, tags_body, AddDocumentRequest, CreateIndexRequest, DocumentInfo, IndexInfo,
    SearchRequest, SearchResponse,
};
use crate::transport::{HttpMethod, HttpTransport, Transport, WireRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Public,
    Authenticated,
}

/// Client for the Verbex REST API.
///
/// Every operation is one request/response round trip. A response whose
/// envelope reports failure comes back as an [`ApiError`]; an `Ok` envelope
/// always has `is_success() == true`.
pub struct VerbexClient {
    transport: Box<dyn Transport>,
    access_key: String,
}

impl VerbexClient {
    /// Build a client over a pooled [`HttpTransport`].
    pub fn new(cfg: &ClientConfig) -> ApiResult<Self> {
        let transport = HttpTransport::new(cfg)?;
        tracing::debug!(endpoint = transport.base_url(), "verbex client created");
        Ok(Self::with_transport(transport, cfg.access_key.clone()))
    }

    pub fn with_transport(transport: impl Transport + 'static, access_key: impl Into<String>) -> Self {
        Self {
            transport: Box::new(transport),
            access_key: access_key.into(),
        }
    }

    /// Release the connection pool. Dropping the client does the same.
    pub fn close(self) {
        tracing::debug!("verbex client closed");
    }

    pub async fn root_health_check(&self) -> ApiResult<ResponseEnvelope> {
        self.request(HttpMethod::Get, "/".into(), None, Access::Public)
            .await
    }

    pub async fn health_check(&self) -> ApiResult<ResponseEnvelope> {
        self.request(HttpMethod::Get, "/v1.0/health".into(), None, Access::Public)
            .await
    }

    pub async fn login(&self, username: &str, password: &str) -> ApiResult<ResponseEnvelope> {
        let mut body = Map::new();
        body.insert("Username".into(), Value::from(username));
        body.insert("Password".into(), Value::from(password));
        self.request(
            HttpMethod::Post,
            "/v1.0/auth/login".into(),
            Some(Value::Object(body)),
            Access::Public,
        )
        .await
    }

    pub async fn validate_token(&self) -> ApiResult<ResponseEnvelope> {
        self.request(
            HttpMethod::Get,
            "/v1.0/auth/validate".into(),
            None,
            Access::Authenticated,
        )
        .await
    }

    pub async fn list_indices(&self) -> ApiResult<ResponseEnvelope> {
        self.request(HttpMethod::Get, "/v1.0/indices".into(), None, Access::Authenticated)
            .await
    }

    pub async fn create_index(&self, request: &CreateIndexRequest) -> ApiResult<ResponseEnvelope> {
        self.request(
            HttpMethod::Post,
            "/v1.0/indices".into(),
            Some(request.to_wire()),
            Access::Authenticated,
        )
        .await
    }

    pub async fn get_index(&self, index_id: &str) -> ApiResult<ResponseEnvelope> {
        self.request(HttpMethod::Get, index_path(index_id), None, Access::Authenticated)
            .await
    }

    pub async fn delete_index(&self, index_id: &str) -> ApiResult<ResponseEnvelope> {
        self.request(HttpMethod::Delete, index_path(index_id), None, Access::Authenticated)
            .await
    }

    /// Replace the index labels. An empty slice clears them.
    pub async fn update_index_labels(
        &self,
        index_id: &str,
        labels: &[String],
    ) -> ApiResult<ResponseEnvelope> {
        self.request(
            HttpMethod::Put,
            format!("{}/labels", index_path(index_id)),
            Some(labels_body(labels)),
            Access::Authenticated,
        )
        .await
    }

    /// Replace the index tags. An empty map clears them.
    pub async fn update_index_tags(
        &self,
        index_id: &str,
        tags: &BTreeMap<String, String>,
    ) -> ApiResult<ResponseEnvelope> {
        self.request(
            HttpMethod::Put,
            format!("{}/tags", index_path(index_id)),
            Some(tags_body(tags)),
            Access::Authenticated,
        )
        .await
    }

    pub async fn list_documents(&self, index_id: &str) -> ApiResult<ResponseEnvelope> {
        self.request(
            HttpMethod::Get,
            documents_path(index_id),
            None,
            Access::Authenticated,
        )
        .await
    }

    pub async fn add_document(
        &self,
        index_id: &str,
        request: &AddDocumentRequest,
    ) -> ApiResult<ResponseEnvelope> {
        self.request(
            HttpMethod::Post,
            documents_path(index_id),
            Some(request.to_wire()),
            Access::Authenticated,
        )
        .await
    }

    pub async fn get_document(&self, index_id: &str, document_id: &str) -> ApiResult<ResponseEnvelope> {
        self.request(
            HttpMethod::Get,
            document_path(index_id, document_id),
            None,
            Access::Authenticated,
        )
        .await
    }

    pub async fn delete_document(
        &self,
        index_id: &str,
        document_id: &str,
    ) -> ApiResult<ResponseEnvelope> {
        self.request(
            HttpMethod::Delete,
            document_path(index_id, document_id),
            None,
            Access::Authenticated,
        )
        .await
    }

    pub async fn update_document_labels(
        &self,
        index_id: &str,
        document_id: &str,
        labels: &[String],
    ) -> ApiResult<ResponseEnvelope> {
        self.request(
            HttpMethod::Put,
            format!("{}/labels", document_path(index_id, document_id)),
            Some(labels_body(labels)),
            Access::Authenticated,
        )
        .await
    }

    pub async fn update_document_tags(
        &self,
        index_id: &str,
        document_id: &str,
        tags: &BTreeMap<String, String>,
    ) -> ApiResult<ResponseEnvelope> {
        self.request(
            HttpMethod::Put,
            format!("{}/tags", document_path(index_id, document_id)),
            Some(tags_body(tags)),
            Access::Authenticated,
        )
        .await
    }

    pub async fn search(&self, index_id: &str, request: &SearchRequest) -> ApiResult<ResponseEnvelope> {
        self.request(
            HttpMethod::Post,
            format!("{}/search", index_path(index_id)),
            Some(request.to_wire()),
            Access::Authenticated,
        )
        .await
    }

    /// All indices as typed records; empty when the payload lists none.
    pub async fn get_indices(&self) -> ApiResult<Vec<IndexInfo>> {
        let envelope = self.list_indices().await?;
        project_list(&envelope, "indices")
    }

    pub async fn get_index_info(&self, index_id: &str) -> ApiResult<Option<IndexInfo>> {
        let envelope = self.get_index(index_id).await?;
        project(envelope)
    }

    pub async fn get_documents(&self, index_id: &str) -> ApiResult<Vec<DocumentInfo>> {
        let envelope = self.list_documents(index_id).await?;
        project_list(&envelope, "documents")
    }

    pub async fn get_document_info(
        &self,
        index_id: &str,
        document_id: &str,
    ) -> ApiResult<Option<DocumentInfo>> {
        let envelope = self.get_document(index_id, document_id).await?;
        project(envelope)
    }

    pub async fn search_documents(
        &self,
        index_id: &str,
        request: &SearchRequest,
    ) -> ApiResult<Option<SearchResponse>> {
        let envelope = self.search(index_id, request).await?;
        project(envelope)
    }

    async fn request(
        &self,
        method: HttpMethod,
        path: String,
        body: Option<Value>,
        access: Access,
    ) -> ApiResult<ResponseEnvelope> {
        let mut request = WireRequest::new(method, path);
        if let Some(body) = body {
            request = request.with_body(body);
        }
        if access == Access::Authenticated {
            request = request.with_bearer(self.access_key.as_str());
        }

        let started = Instant::now();
        let response = match self.transport.send(request.clone()).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(
                    method = %request.method,
                    path = %request.path,
                    error = %err,
                    "verbex request failed before a response arrived"
                );
                return Err(ApiError::Transport(err));
            }
        };
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        tracing::debug!(
            method = %request.method,
            path = %request.path,
            status = response.status,
            elapsed_ms,
            "verbex request completed"
        );

        let envelope = ResponseEnvelope::from_transport(response.status, &response.body);
        if envelope.is_success() {
            Ok(envelope)
        } else {
            Err(ApiError::from_envelope(envelope))
        }
    }
}

impl std::fmt::Debug for VerbexClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerbexClient")
            .field("access_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

fn encode(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

fn index_path(index_id: &str) -> String {
    format!("/v1.0/indices/{}", encode(index_id))
}

fn documents_path(index_id: &str) -> String {
    format!("{}/documents", index_path(index_id))
}

fn document_path(index_id: &str, document_id: &str) -> String {
    format!("{}/{}", documents_path(index_id), encode(document_id))
}

fn project<T: DeserializeOwned>(envelope: ResponseEnvelope) -> ApiResult<Option<T>> {
    match envelope.into_data() {
        None => Ok(None),
        Some(data) => serde_json::from_value(data)
            .map(Some)
            .map_err(|err| ApiError::UnexpectedPayload(err.to_string())),
    }
}

fn project_list<T: DeserializeOwned>(envelope: &ResponseEnvelope, field: &str) -> ApiResult<Vec<T>> {
    match envelope.data_field(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(items) => serde_json::from_value(items.clone())
            .map_err(|err| ApiError::UnexpectedPayload(format!("{field}: {err}"))),
    }
}
