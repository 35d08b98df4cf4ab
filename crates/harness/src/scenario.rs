//! The scenario catalogue, in run order.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenarioGroup {
    Health,
    Authentication,
    IndexManagement,
    DocumentManagement,
    Search,
    Cleanup,
}

impl ScenarioGroup {
    pub const ALL: [ScenarioGroup; 6] = [
        ScenarioGroup::Health,
        ScenarioGroup::Authentication,
        ScenarioGroup::IndexManagement,
        ScenarioGroup::DocumentManagement,
        ScenarioGroup::Search,
        ScenarioGroup::Cleanup,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ScenarioGroup::Health => "Health Checks",
            ScenarioGroup::Authentication => "Authentication",
            ScenarioGroup::IndexManagement => "Index Management",
            ScenarioGroup::DocumentManagement => "Document Management",
            ScenarioGroup::Search => "Search",
            ScenarioGroup::Cleanup => "Cleanup",
        }
    }

    /// Scenarios of this group, in run order.
    pub fn scenarios(&self) -> impl Iterator<Item = Scenario> + '_ {
        Scenario::ALL.iter().copied().filter(move |s| s.group() == *self)
    }
}

impl fmt::Display for ScenarioGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    RootHealthCheck,
    HealthEndpoint,

    LoginValid,
    LoginInvalid,
    ValidateToken,
    ValidateInvalidToken,

    ListIndicesInitial,
    CreateIndex,
    CreateDuplicateIndex,
    GetIndex,
    GetIndexNotFound,
    ListIndicesAfterCreate,
    CreateIndexWithLabelsAndTags,
    GetIndexWithLabelsAndTags,
    UpdateIndexLabels,
    UpdateIndexTags,

    ListDocumentsEmpty,
    AddDocument,
    AddDocumentWithId,
    AddMultipleDocuments,
    ListDocumentsAfterAdd,
    GetDocument,
    GetDocumentNotFound,
    AddDocumentWithLabelsAndTags,
    GetDocumentWithLabelsAndTags,
    UpdateDocumentLabels,
    UpdateDocumentTags,

    SearchBasic,
    SearchWithResults,
    SearchMultipleTerms,
    SearchMaxResults,
    SearchNoResults,
    SearchDocumentsHelper,
    SearchLabelFilter,
    SearchTagFilter,
    SearchLabelsAndTags,

    DeleteDocument,
    DeleteDocumentNotFound,
    VerifyDocumentDeleted,
    DeleteIndex,
    DeleteIndexNotFound,
    VerifyIndexDeleted,
}

impl Scenario {
    pub const ALL: [Scenario; 42] = [
        Scenario::RootHealthCheck,
        Scenario::HealthEndpoint,
        Scenario::LoginValid,
        Scenario::LoginInvalid,
        Scenario::ValidateToken,
        Scenario::ValidateInvalidToken,
        Scenario::ListIndicesInitial,
        Scenario::CreateIndex,
        Scenario::CreateDuplicateIndex,
        Scenario::GetIndex,
        Scenario::GetIndexNotFound,
        Scenario::ListIndicesAfterCreate,
        Scenario::CreateIndexWithLabelsAndTags,
        Scenario::GetIndexWithLabelsAndTags,
        Scenario::UpdateIndexLabels,
        Scenario::UpdateIndexTags,
        Scenario::ListDocumentsEmpty,
        Scenario::AddDocument,
        Scenario::AddDocumentWithId,
        Scenario::AddMultipleDocuments,
        Scenario::ListDocumentsAfterAdd,
        Scenario::GetDocument,
        Scenario::GetDocumentNotFound,
        Scenario::AddDocumentWithLabelsAndTags,
        Scenario::GetDocumentWithLabelsAndTags,
        Scenario::UpdateDocumentLabels,
        Scenario::UpdateDocumentTags,
        Scenario::SearchBasic,
        Scenario::SearchWithResults,
        Scenario::SearchMultipleTerms,
        Scenario::SearchMaxResults,
        Scenario::SearchNoResults,
        Scenario::SearchDocumentsHelper,
        Scenario::SearchLabelFilter,
        Scenario::SearchTagFilter,
        Scenario::SearchLabelsAndTags,
        Scenario::DeleteDocument,
        Scenario::DeleteDocumentNotFound,
        Scenario::VerifyDocumentDeleted,
        Scenario::DeleteIndex,
        Scenario::DeleteIndexNotFound,
        Scenario::VerifyIndexDeleted,
    ];

    /// Name printed on the result line.
    pub fn name(&self) -> &'static str {
        match self {
            Scenario::RootHealthCheck => "Root health check",
            Scenario::HealthEndpoint => "Health endpoint",
            Scenario::LoginValid => "Login with valid credentials",
            Scenario::LoginInvalid => "Login with invalid credentials",
            Scenario::ValidateToken => "Validate token",
            Scenario::ValidateInvalidToken => "Validate invalid token",
            Scenario::ListIndicesInitial => "List indices (initial)",
            Scenario::CreateIndex => "Create index",
            Scenario::CreateDuplicateIndex => "Create duplicate index fails",
            Scenario::GetIndex => "Get index",
            Scenario::GetIndexNotFound => "Get index not found",
            Scenario::ListIndicesAfterCreate => "List indices (after create)",
            Scenario::CreateIndexWithLabelsAndTags => "Create index with labels and tags",
            Scenario::GetIndexWithLabelsAndTags => "Get index with labels and tags",
            Scenario::UpdateIndexLabels => "Update index labels",
            Scenario::UpdateIndexTags => "Update index tags",
            Scenario::ListDocumentsEmpty => "List documents (empty)",
            Scenario::AddDocument => "Add document",
            Scenario::AddDocumentWithId => "Add document with ID",
            Scenario::AddMultipleDocuments => "Add multiple documents",
            Scenario::ListDocumentsAfterAdd => "List documents (after add)",
            Scenario::GetDocument => "Get document",
            Scenario::GetDocumentNotFound => "Get document not found",
            Scenario::AddDocumentWithLabelsAndTags => "Add document with labels and tags",
            Scenario::GetDocumentWithLabelsAndTags => "Get document with labels and tags",
            Scenario::UpdateDocumentLabels => "Update document labels",
            Scenario::UpdateDocumentTags => "Update document tags",
            Scenario::SearchBasic => "Basic search",
            Scenario::SearchWithResults => "Search with results",
            Scenario::SearchMultipleTerms => "Search multiple terms",
            Scenario::SearchMaxResults => "Search with max results",
            Scenario::SearchNoResults => "Search with no results",
            Scenario::SearchDocumentsHelper => "Search documents helper",
            Scenario::SearchLabelFilter => "Search with label filter",
            Scenario::SearchTagFilter => "Search with tag filter",
            Scenario::SearchLabelsAndTags => "Search with labels and tags",
            Scenario::DeleteDocument => "Delete document",
            Scenario::DeleteDocumentNotFound => "Delete document not found",
            Scenario::VerifyDocumentDeleted => "Verify document deleted",
            Scenario::DeleteIndex => "Delete index",
            Scenario::DeleteIndexNotFound => "Delete index not found",
            Scenario::VerifyIndexDeleted => "Verify index deleted",
        }
    }

    pub fn group(&self) -> ScenarioGroup {
        use Scenario::*;
        match self {
            RootHealthCheck | HealthEndpoint => ScenarioGroup::Health,
            LoginValid | LoginInvalid | ValidateToken | ValidateInvalidToken => {
                ScenarioGroup::Authentication
            }
            ListIndicesInitial
            | CreateIndex
            | CreateDuplicateIndex
            | GetIndex
            | GetIndexNotFound
            | ListIndicesAfterCreate
            | CreateIndexWithLabelsAndTags
            | GetIndexWithLabelsAndTags
            | UpdateIndexLabels
            | UpdateIndexTags => ScenarioGroup::IndexManagement,
            ListDocumentsEmpty
            | AddDocument
            | AddDocumentWithId
            | AddMultipleDocuments
            | ListDocumentsAfterAdd
            | GetDocument
            | GetDocumentNotFound
            | AddDocumentWithLabelsAndTags
            | GetDocumentWithLabelsAndTags
            | UpdateDocumentLabels
            | UpdateDocumentTags => ScenarioGroup::DocumentManagement,
            SearchBasic
            | SearchWithResults
            | SearchMultipleTerms
            | SearchMaxResults
            | SearchNoResults
            | SearchDocumentsHelper
            | SearchLabelFilter
            | SearchTagFilter
            | SearchLabelsAndTags => ScenarioGroup::Search,
            DeleteDocument
            | DeleteDocumentNotFound
            | VerifyDocumentDeleted
            | DeleteIndex
            | DeleteIndexNotFound
            | VerifyIndexDeleted => ScenarioGroup::Cleanup,
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
