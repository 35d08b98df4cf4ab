//! Verbex client SDK
//!
//! Talks to a Verbex document-indexing/search server over its REST API and
//! hands back a stable client-side view of every reply.
//!
//! Two server generations are out there: current builds speak PascalCase
//! (`Success`, `StatusCode`, `DocumentId`), older ones camelCase. The SDK
//! papers over that in two places:
//!
//! - [`normalize`] rewrites every payload key to start lowercase and adds an
//!   `id` alias next to `documentId`.
//! - [`ResponseEnvelope`] reads the wrapper fields through [`FieldLookup`],
//!   which accepts either spelling.
//!
//! Failures never come back as envelopes. A reply with `success: false`
//! becomes an [`ApiError`] classified by status (404 → `NotFound`, 409 →
//! `Conflict`, and so on); network trouble becomes `ApiError::Transport`
//! with status `0`.
//!
//! ## Quick example
//!
//! ```no_run
//! use sdk::{ClientConfig, CreateIndexRequest, SearchRequest, VerbexClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sdk::ApiError> {
//!     let client = VerbexClient::new(&ClientConfig::new("http://localhost:8080", "verbexadmin"))?;
//!
//!     client.create_index(&CreateIndexRequest::new("articles")).await?;
//!     let hits = client.search("articles", &SearchRequest::new("fox")).await?;
//!     println!("{:?}", hits.data_array("results"));
//!
//!     client.close();
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod envelope;
mod error;
mod models;
mod normalize;
mod transport;

pub use client::VerbexClient;
pub use config::ClientConfig;
pub use envelope::{FieldLookup, ResponseEnvelope};
pub use error::{ApiError, ApiResult, Rejection};
pub use models::{
    labels_body, tags_body, AddDocumentRequest, CreateIndexRequest, DocumentInfo, IndexInfo,
    SearchRequest, SearchResponse, SearchResult, StorageMode, DEFAULT_MAX_RESULTS,
};
pub use normalize::{normalize, normalize_payload, DOCUMENT_ID_FIELD, ID_FIELD};
pub use transport::{HttpMethod, HttpTransport, Transport, TransportError, WireRequest, WireResponse};
