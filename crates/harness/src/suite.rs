//! Scenario bodies and the state they share.
//!
//! Scenarios run in catalogue order against one test index. Later scenarios
//! rely on documents added by earlier ones, tracked in `documents`.

use std::collections::BTreeMap;

use sdk::{
    AddDocumentRequest, ApiResult, CreateIndexRequest, ResponseEnvelope, SearchRequest,
    StorageMode, VerbexClient,
};
use serde_json::Value;
use uuid::Uuid;

use crate::assert::{
    array_len, ensure, ensure_eq, ensure_gt, ensure_present, ensure_true, expect_status,
    object_len, ScenarioError, ScenarioResult,
};
use crate::config::HarnessConfig;
use crate::scenario::Scenario;

const TEST_INDEX_NAME: &str = "Test Index";
const MISSING_INDEX_ID: &str = "non-existent-index-12345";
const MISSING_INDEX_DELETE_ID: &str = "non-existent-index-67890";
const NO_MATCH_QUERY: &str = "xyznonexistent12345";

const SEARCH_CORPUS: [&str; 4] = [
    "Machine learning algorithms can identify patterns in large datasets.",
    "Natural language processing enables computers to understand human language.",
    "Deep learning neural networks have revolutionized image recognition.",
    "Cloud computing provides scalable infrastructure for modern applications.",
];

/// First eight hex digits of a fresh v4 uuid.
pub fn short_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(8);
    id
}

fn tags<const N: usize>(pairs: [(&str, &str); N]) -> BTreeMap<String, String> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn strings<const N: usize>(items: [&str; N]) -> Vec<String> {
    items.into_iter().map(str::to_string).collect()
}

fn field_str<'a>(data: &'a Value, name: &str) -> Option<&'a str> {
    data.get(name).and_then(Value::as_str)
}

fn check_status(envelope: &ResponseEnvelope, status: u16) -> ScenarioResult {
    ensure(envelope.is_success(), "response.success should be true")?;
    ensure_eq(envelope.status_code(), status, "response.status_code")
}

fn payload(envelope: &ResponseEnvelope) -> ScenarioResult<&Value> {
    ensure_present(envelope.data(), "response.data")
}

fn results_len(envelope: &ResponseEnvelope) -> ScenarioResult<usize> {
    ensure(envelope.is_success(), "response.success should be true")?;
    Ok(envelope.data_array("results").map_or(0, Vec::len))
}

/// Whether a search envelope lists `document_id` among its results.
fn contains_document(envelope: &ResponseEnvelope, document_id: &str) -> bool {
    envelope.data_array("results").is_some_and(|results| {
        results
            .iter()
            .any(|r| r.get("documentId").and_then(Value::as_str) == Some(document_id))
    })
}

fn sorted(mut items: Vec<String>) -> Vec<String> {
    items.sort();
    items
}

/// Shared state of one conformance run.
pub struct Suite {
    client: VerbexClient,
    settings: HarnessConfig,
    endpoint: String,
    index_id: String,
    documents: Vec<String>,
    labeled_document: Option<String>,
}

impl Suite {
    pub fn new(client: VerbexClient, settings: HarnessConfig, endpoint: &str, index_id: String) -> Self {
        Self {
            client,
            settings,
            endpoint: endpoint.to_string(),
            index_id,
            documents: Vec::new(),
            labeled_document: None,
        }
    }

    /// Release the main client.
    pub fn close(self) {
        self.client.close();
    }

    pub async fn execute(&mut self, scenario: Scenario) -> ScenarioResult {
        match scenario {
            Scenario::RootHealthCheck => {
                let envelope = self.client.root_health_check().await?;
                Self::check_health(&envelope)
            }
            Scenario::HealthEndpoint => {
                let envelope = self.client.health_check().await?;
                Self::check_health(&envelope)
            }

            Scenario::LoginValid => self.login_valid().await,
            Scenario::LoginInvalid => {
                let err = expect_status(self.client.login("invalid", "invalid").await, 401)?;
                ensure(!err.message().is_empty(), "error.message should not be empty")
            }
            Scenario::ValidateToken => {
                let envelope = self.client.validate_token().await?;
                check_status(&envelope, 200)?;
                ensure_true(payload(&envelope)?.get("valid").and_then(Value::as_bool), "data.valid")
            }
            Scenario::ValidateInvalidToken => self.validate_invalid_token().await,

            Scenario::ListIndicesInitial => {
                let envelope = self.client.list_indices().await?;
                check_status(&envelope, 200)?;
                let data = payload(&envelope)?;
                array_len(data.get("indices"), "data.indices")?;
                ensure_present(data.get("count"), "data.count").map(|_| ())
            }
            Scenario::CreateIndex => self.create_index().await,
            Scenario::CreateDuplicateIndex => {
                let request = CreateIndexRequest::new(self.index_id.as_str()).with_name("Duplicate");
                expect_status(self.client.create_index(&request).await, 409).map(|_| ())
            }
            Scenario::GetIndex => {
                let envelope = self.client.get_index(&self.index_id).await?;
                check_status(&envelope, 200)?;
                let data = payload(&envelope)?;
                ensure_eq(field_str(data, "id"), Some(self.index_id.as_str()), "data.id")?;
                ensure_eq(field_str(data, "name"), Some(TEST_INDEX_NAME), "data.name")?;
                ensure_present(data.get("createdUtc"), "data.createdUtc").map(|_| ())
            }
            Scenario::GetIndexNotFound => {
                expect_status(self.client.get_index(MISSING_INDEX_ID).await, 404).map(|_| ())
            }
            Scenario::ListIndicesAfterCreate => {
                let indices = self.client.get_indices().await?;
                ensure(
                    indices.iter().any(|index| index.id == self.index_id),
                    "test index should be in list",
                )
            }
            Scenario::CreateIndexWithLabelsAndTags => self.create_labeled_index().await,
            Scenario::GetIndexWithLabelsAndTags => self.get_labeled_index().await,
            Scenario::UpdateIndexLabels => self.update_index_labels().await,
            Scenario::UpdateIndexTags => self.update_index_tags().await,

            Scenario::ListDocumentsEmpty => {
                let envelope = self.client.list_documents(&self.index_id).await?;
                check_status(&envelope, 200)?;
                let data = payload(&envelope)?;
                array_len(data.get("documents"), "data.documents")?;
                ensure_eq(data.get("count").and_then(Value::as_i64), Some(0), "data.count")
            }
            Scenario::AddDocument => {
                let request = AddDocumentRequest::new("The quick brown fox jumps over the lazy dog.");
                let envelope = self.client.add_document(&self.index_id, &request).await?;
                check_status(&envelope, 201)?;
                let document_id = Self::added_document_id(&envelope)?;
                ensure_present(payload(&envelope)?.get("message"), "data.message")?;
                self.documents.push(document_id);
                Ok(())
            }
            Scenario::AddDocumentWithId => {
                let document_id = Uuid::new_v4().to_string();
                let request = AddDocumentRequest::new(
                    "Python is a versatile programming language used for web development, data science, and automation.",
                )
                .with_id(document_id.as_str());
                let envelope = self.client.add_document(&self.index_id, &request).await?;
                check_status(&envelope, 201)?;
                ensure_eq(
                    envelope.data_str("documentId"),
                    Some(document_id.as_str()),
                    "data.documentId",
                )?;
                self.documents.push(document_id);
                Ok(())
            }
            Scenario::AddMultipleDocuments => {
                for content in SEARCH_CORPUS {
                    let envelope = self
                        .client
                        .add_document(&self.index_id, &AddDocumentRequest::new(content))
                        .await?;
                    ensure(envelope.is_success(), "response.success should be true")?;
                    self.documents.push(Self::added_document_id(&envelope)?);
                }
                Ok(())
            }
            Scenario::ListDocumentsAfterAdd => self.list_documents_after_add().await,
            Scenario::GetDocument => {
                let document_id = self.first_document()?;
                let envelope = self.client.get_document(&self.index_id, &document_id).await?;
                check_status(&envelope, 200)?;
                ensure_eq(
                    field_str(payload(&envelope)?, "id"),
                    Some(document_id.as_str()),
                    "data.id",
                )
            }
            Scenario::GetDocumentNotFound => {
                let missing = Uuid::new_v4().to_string();
                expect_status(self.client.get_document(&self.index_id, &missing).await, 404)
                    .map(|_| ())
            }
            Scenario::AddDocumentWithLabelsAndTags => {
                let request = AddDocumentRequest::new(
                    "This document has labels and tags for testing metadata support.",
                )
                .with_labels(["important", "reviewed"])
                .with_tags([("author", "test-harness"), ("category", "technical")]);
                let envelope = self.client.add_document(&self.index_id, &request).await?;
                check_status(&envelope, 201)?;
                let document_id = Self::added_document_id(&envelope)?;
                self.labeled_document = Some(document_id.clone());
                self.documents.push(document_id);
                Ok(())
            }
            Scenario::GetDocumentWithLabelsAndTags => self.get_labeled_document().await,
            Scenario::UpdateDocumentLabels => self.update_document_labels().await,
            Scenario::UpdateDocumentTags => self.update_document_tags().await,

            Scenario::SearchBasic => {
                let envelope = self.search(SearchRequest::new("fox")).await?;
                check_status(&envelope, 200)?;
                let data = payload(&envelope)?;
                ensure_eq(field_str(data, "query"), Some("fox"), "data.query")?;
                array_len(data.get("results"), "data.results")?;
                ensure_present(data.get("totalCount"), "data.totalCount")?;
                ensure_present(data.get("maxResults"), "data.maxResults").map(|_| ())
            }
            Scenario::SearchWithResults => self.search_with_results().await,
            Scenario::SearchMultipleTerms => {
                let envelope = self.search(SearchRequest::new("machine learning")).await?;
                ensure(envelope.is_success(), "response.success should be true")?;
                array_len(envelope.data_field("results"), "data.results").map(|_| ())
            }
            Scenario::SearchMaxResults => {
                let envelope = self.search(SearchRequest::new("the").with_max_results(2)).await?;
                ensure_eq(envelope.data_i64("maxResults"), Some(2), "data.maxResults")?;
                let returned = results_len(&envelope)?;
                ensure(returned <= 2, format!("results count expected <= 2, got {returned}"))
            }
            Scenario::SearchNoResults => {
                let envelope = self.search(SearchRequest::new(NO_MATCH_QUERY)).await?;
                ensure_eq(results_len(&envelope)?, 0, "results count")?;
                match envelope.data_i64("totalCount") {
                    Some(total) => ensure_eq(total, 0, "data.totalCount"),
                    None => Ok(()),
                }
            }
            Scenario::SearchDocumentsHelper => {
                let response = self
                    .client
                    .search_documents(&self.index_id, &SearchRequest::new("programming"))
                    .await?
                    .ok_or_else(|| ScenarioError::Assertion("search_response should not be null".into()))?;
                ensure_eq(response.query.as_str(), "programming", "query")?;
                ensure(response.total_count >= 0, "total_count should not be negative")
            }
            Scenario::SearchLabelFilter => self.search_label_filter().await,
            Scenario::SearchTagFilter => self.search_tag_filter().await,
            Scenario::SearchLabelsAndTags => self.search_labels_and_tags().await,

            Scenario::DeleteDocument => {
                let document_id = self
                    .documents
                    .pop()
                    .ok_or_else(|| ScenarioError::Assertion("No test documents to delete".into()))?;
                let envelope = self.client.delete_document(&self.index_id, &document_id).await?;
                check_status(&envelope, 200)?;
                let data = payload(&envelope)?;
                ensure_eq(
                    field_str(data, "documentId"),
                    Some(document_id.as_str()),
                    "data.documentId",
                )?;
                ensure_present(data.get("message"), "data.message").map(|_| ())
            }
            Scenario::DeleteDocumentNotFound => {
                let missing = Uuid::new_v4().to_string();
                expect_status(self.client.delete_document(&self.index_id, &missing).await, 404)
                    .map(|_| ())
            }
            Scenario::VerifyDocumentDeleted => {
                // Nothing left to delete is not a failure.
                let Some(document_id) = self.documents.pop() else {
                    return Ok(());
                };
                self.client.delete_document(&self.index_id, &document_id).await?;
                expect_status(self.client.get_document(&self.index_id, &document_id).await, 404)
                    .map(|_| ())
            }
            Scenario::DeleteIndex => {
                let envelope = self.client.delete_index(&self.index_id).await?;
                check_status(&envelope, 200)?;
                let data = payload(&envelope)?;
                ensure_eq(
                    field_str(data, "indexId"),
                    Some(self.index_id.as_str()),
                    "data.indexId",
                )?;
                ensure_present(data.get("message"), "data.message").map(|_| ())
            }
            Scenario::DeleteIndexNotFound => {
                expect_status(self.client.delete_index(MISSING_INDEX_DELETE_ID).await, 404)
                    .map(|_| ())
            }
            Scenario::VerifyIndexDeleted => {
                expect_status(self.client.get_index(&self.index_id).await, 404).map(|_| ())
            }
        }
    }

    fn check_health(envelope: &ResponseEnvelope) -> ScenarioResult {
        check_status(envelope, 200)?;
        let data = payload(envelope)?;
        ensure_eq(field_str(data, "status"), Some("Healthy"), "data.status")?;
        ensure_present(data.get("version"), "data.version")?;
        ensure_present(data.get("timestamp"), "data.timestamp").map(|_| ())
    }

    fn added_document_id(envelope: &ResponseEnvelope) -> ScenarioResult<String> {
        let id = ensure_present(envelope.data_field("documentId"), "data.documentId")?;
        Ok(match id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    fn first_document(&self) -> ScenarioResult<String> {
        self.documents
            .first()
            .cloned()
            .ok_or_else(|| ScenarioError::Assertion("No test documents were added".into()))
    }

    async fn search(&self, request: SearchRequest) -> ApiResult<ResponseEnvelope> {
        self.client.search(&self.index_id, &request).await
    }

    async fn login_valid(&self) -> ScenarioResult {
        let envelope = self
            .client
            .login(&self.settings.login_username, &self.settings.login_password)
            .await?;
        check_status(&envelope, 200)?;
        let data = payload(&envelope)?;
        ensure_present(data.get("token"), "data.token")?;
        ensure_eq(
            field_str(data, "username"),
            Some(self.settings.login_username.as_str()),
            "data.username",
        )
    }

    async fn validate_invalid_token(&self) -> ScenarioResult {
        let cfg = self
            .settings
            .client_config(&self.endpoint, &self.settings.invalid_token);
        let invalid = VerbexClient::new(&cfg)?;
        let result = invalid.validate_token().await;
        invalid.close();
        expect_status(result, 401).map(|_| ())
    }

    async fn create_index(&self) -> ScenarioResult {
        let request = CreateIndexRequest::new(self.index_id.as_str())
            .with_name(TEST_INDEX_NAME)
            .with_description("A test index for SDK validation")
            .with_in_memory(true)
            .with_storage_mode(StorageMode::MemoryOnly);
        let envelope = self.client.create_index(&request).await?;
        check_status(&envelope, 201)?;
        let data = payload(&envelope)?;
        ensure_present(data.get("message"), "data.message")?;
        let index = ensure_present(data.get("index"), "data.index")?;
        ensure_eq(field_str(index, "id"), Some(self.index_id.as_str()), "index.id")?;
        ensure_eq(field_str(index, "name"), Some(TEST_INDEX_NAME), "index.name")
    }

    async fn create_labeled_index(&self) -> ScenarioResult {
        let index_id = format!("test-labeled-{}", short_id());
        let request = CreateIndexRequest::new(index_id.as_str())
            .with_name("Labeled Test Index")
            .with_description("An index with labels and tags")
            .with_in_memory(true)
            .with_labels(["test", "labeled"])
            .with_tags([("environment", "testing"), ("owner", "sdk-harness")]);
        let envelope = self.client.create_index(&request).await?;

        let checked = async {
            check_status(&envelope, 201)?;
            ensure_present(payload(&envelope)?.get("index"), "data.index")?;
            Ok::<(), ScenarioError>(())
        }
        .await;

        self.client.delete_index(&index_id).await?;
        checked
    }

    async fn get_labeled_index(&self) -> ScenarioResult {
        let index_id = format!("test-labeled-get-{}", short_id());
        let request = CreateIndexRequest::new(index_id.as_str())
            .with_name("Get Labeled Index")
            .with_in_memory(true)
            .with_labels(["retrieval", "test"])
            .with_tags([("purpose", "verification"), ("version", "1.0")]);
        self.client.create_index(&request).await?;

        let checked = async {
            let envelope = self.client.get_index(&index_id).await?;
            ensure(envelope.is_success(), "response.success should be true")?;
            let data = payload(&envelope)?;
            ensure_eq(array_len(data.get("labels"), "data.labels")?, 2, "labels count")?;
            ensure_eq(object_len(data.get("tags"), "data.tags")?, 2, "tags count")
        }
        .await;

        self.client.delete_index(&index_id).await?;
        checked
    }

    async fn update_index_labels(&self) -> ScenarioResult {
        let index_id = format!("test-relabel-{}", short_id());
        let request = CreateIndexRequest::new(index_id.as_str())
            .with_in_memory(true)
            .with_labels(["before"]);
        self.client.create_index(&request).await?;

        let replacement = strings(["after", "replaced"]);
        let checked = async {
            self.client.update_index_labels(&index_id, &replacement).await?;
            let info = self
                .client
                .get_index_info(&index_id)
                .await?
                .ok_or_else(|| ScenarioError::Assertion("response.data should not be null".into()))?;
            ensure_eq(sorted(info.labels), replacement.clone(), "index.labels")
        }
        .await;

        self.client.delete_index(&index_id).await?;
        checked
    }

    async fn update_index_tags(&self) -> ScenarioResult {
        let index_id = format!("test-retag-{}", short_id());
        let request = CreateIndexRequest::new(index_id.as_str())
            .with_in_memory(true)
            .with_tags([("stage", "before"), ("obsolete", "yes")]);
        self.client.create_index(&request).await?;

        let replacement = tags([("stage", "after"), ("owner", "sdk-harness")]);
        let checked = async {
            self.client.update_index_tags(&index_id, &replacement).await?;
            let info = self
                .client
                .get_index_info(&index_id)
                .await?
                .ok_or_else(|| ScenarioError::Assertion("response.data should not be null".into()))?;
            ensure_eq(&info.tags, &replacement, "index.tags")
        }
        .await;

        self.client.delete_index(&index_id).await?;
        checked
    }

    async fn list_documents_after_add(&self) -> ScenarioResult {
        let envelope = self.client.list_documents(&self.index_id).await?;
        ensure(envelope.is_success(), "response.success should be true")?;
        let expected = self.documents.len();
        ensure_eq(
            envelope.data_i64("count"),
            Some(expected as i64),
            "data.count",
        )?;
        let documents = envelope.data_array("documents").ok_or_else(|| {
            ScenarioError::Assertion("data.documents should not be null".into())
        })?;
        ensure_eq(documents.len(), expected, "documents length")?;
        for document in documents {
            ensure_present(document.get("id"), "document.id")?;
        }
        Ok(())
    }

    async fn get_labeled_document(&mut self) -> ScenarioResult {
        let document_id = Uuid::new_v4().to_string();
        let request = AddDocumentRequest::new("Document for verifying labels and tags retrieval.")
            .with_id(document_id.as_str())
            .with_labels(["verification", "metadata"])
            .with_tags([("source", "sdk-test"), ("priority", "high")]);
        self.client.add_document(&self.index_id, &request).await?;
        self.documents.push(document_id.clone());

        let envelope = self.client.get_document(&self.index_id, &document_id).await?;
        ensure(envelope.is_success(), "response.success should be true")?;
        let data = payload(&envelope)?;
        ensure_eq(array_len(data.get("labels"), "data.labels")?, 2, "labels count")?;
        ensure_eq(object_len(data.get("tags"), "data.tags")?, 2, "tags count")
    }

    fn labeled_document(&self) -> ScenarioResult<String> {
        self.labeled_document
            .clone()
            .ok_or_else(|| ScenarioError::Assertion("No labeled document was added".into()))
    }

    async fn update_document_labels(&self) -> ScenarioResult {
        let document_id = self.labeled_document()?;
        let replacement = strings(["updated"]);
        let envelope = self
            .client
            .update_document_labels(&self.index_id, &document_id, &replacement)
            .await?;
        ensure(envelope.is_success(), "response.success should be true")?;

        let info = self
            .client
            .get_document_info(&self.index_id, &document_id)
            .await?
            .ok_or_else(|| ScenarioError::Assertion("response.data should not be null".into()))?;
        ensure_eq(info.labels, replacement, "document.labels")
    }

    async fn update_document_tags(&self) -> ScenarioResult {
        let document_id = self.labeled_document()?;
        let envelope = self
            .client
            .update_document_tags(&self.index_id, &document_id, &BTreeMap::new())
            .await?;
        ensure(envelope.is_success(), "response.success should be true")?;

        let info = self
            .client
            .get_document_info(&self.index_id, &document_id)
            .await?
            .ok_or_else(|| ScenarioError::Assertion("response.data should not be null".into()))?;
        ensure_eq(info.tags.len(), 0, "document.tags count")
    }

    async fn search_with_results(&self) -> ScenarioResult {
        let envelope = self.search(SearchRequest::new("learning")).await?;
        ensure_gt(results_len(&envelope)?, 0, "results count")?;
        for result in envelope.data_array("results").into_iter().flatten() {
            ensure_present(result.get("documentId"), "result.documentId")?;
            let score = ensure_present(result.get("score"), "result.score")?
                .as_f64()
                .ok_or_else(|| ScenarioError::Assertion("result.score should be a number".into()))?;
            ensure(
                score.is_finite() && score >= 0.0,
                format!("result.score expected a finite non-negative number, got {score}"),
            )?;
        }
        Ok(())
    }

    async fn search_label_filter(&mut self) -> ScenarioResult {
        let document_id = Uuid::new_v4().to_string();
        let request = AddDocumentRequest::new(
            "This document contains searchable content with labels for filter testing.",
        )
        .with_id(document_id.as_str())
        .with_labels(["searchtest", "filterable"]);
        self.client.add_document(&self.index_id, &request).await?;
        self.documents.push(document_id.clone());

        let matching = self
            .search(SearchRequest::new("searchable").with_labels(["searchtest"]))
            .await?;
        ensure_gt(
            results_len(&matching)?,
            0,
            "should find documents with matching label",
        )?;
        ensure(
            contains_document(&matching, &document_id),
            "labelled document should be among the matches",
        )?;

        let unmatched = self
            .search(SearchRequest::new("searchable").with_labels(["nonexistentlabel99"]))
            .await?;
        ensure_eq(
            results_len(&unmatched)?,
            0,
            "should find no documents with non-matching label",
        )
    }

    async fn search_tag_filter(&mut self) -> ScenarioResult {
        let document_id = Uuid::new_v4().to_string();
        let request = AddDocumentRequest::new(
            "This document contains taggable content for tag filter testing.",
        )
        .with_id(document_id.as_str())
        .with_tags([("searchcategory", "testfilter"), ("searchpriority", "high")]);
        self.client.add_document(&self.index_id, &request).await?;
        self.documents.push(document_id.clone());

        let matching = self
            .search(SearchRequest::new("taggable").with_tags([("searchcategory", "testfilter")]))
            .await?;
        ensure_gt(
            results_len(&matching)?,
            0,
            "should find documents with matching tag",
        )?;
        ensure(
            contains_document(&matching, &document_id),
            "tagged document should be among the matches",
        )?;

        let unmatched = self
            .search(SearchRequest::new("taggable").with_tags([("searchcategory", "wrongvalue")]))
            .await?;
        ensure_eq(
            results_len(&unmatched)?,
            0,
            "should find no documents with non-matching tag",
        )
    }

    async fn search_labels_and_tags(&mut self) -> ScenarioResult {
        let document_id = Uuid::new_v4().to_string();
        let request = AddDocumentRequest::new(
            "This document has combined labels and tags for comprehensive filter testing.",
        )
        .with_id(document_id.as_str())
        .with_labels(["combined", "fulltest"])
        .with_tags([("combinedcategory", "both")]);
        self.client.add_document(&self.index_id, &request).await?;
        self.documents.push(document_id.clone());

        let both = self
            .search(
                SearchRequest::new("comprehensive")
                    .with_labels(["combined"])
                    .with_tags([("combinedcategory", "both")]),
            )
            .await?;
        ensure_gt(
            results_len(&both)?,
            0,
            "should find documents matching both label and tag",
        )?;
        ensure(
            contains_document(&both, &document_id),
            "combined document should be among the matches",
        )?;

        // Filters combine with AND: a matching label cannot rescue a wrong tag.
        let label_only = self
            .search(
                SearchRequest::new("comprehensive")
                    .with_labels(["combined"])
                    .with_tags([("combinedcategory", "neither")]),
            )
            .await?;
        ensure_eq(
            results_len(&label_only)?,
            0,
            "should find no documents when only the label matches",
        )
    }
}
