//! Key-casing normalization for server payloads.
//!
//! Current Verbex builds emit PascalCase keys (`DocumentId`, `CreatedUtc`)
//! while older ones emit camelCase. Every payload handed to callers goes
//! through [`normalize`], so the rest of the SDK only ever sees keys that
//! start with a lowercase character.

use serde_json::{Map, Value};

/// Field holding a document identifier once keys are normalized.
pub const DOCUMENT_ID_FIELD: &str = "documentId";

/// Generic identifier alias derived from [`DOCUMENT_ID_FIELD`].
pub const ID_FIELD: &str = "id";

/// Rewrite every mapping key in `value` to start with a lowercase character.
///
/// The rewrite descends into nested mappings and into every element of
/// sequences. Scalars and the order of keys and elements are left untouched.
/// A mapping holding a [`DOCUMENT_ID_FIELD`] but no [`ID_FIELD`] gains an
/// `id` carrying the identifier's string form.
///
/// Normalizing an already-normalized value returns it unchanged.
///
/// ```
/// use serde_json::json;
///
/// let wire = json!({"DocumentId": "doc-1", "Labels": ["a"], "Tags": {"Owner": "x"}});
/// assert_eq!(
///     sdk::normalize(wire),
///     json!({"documentId": "doc-1", "labels": ["a"], "tags": {"owner": "x"}, "id": "doc-1"})
/// );
/// ```
pub fn normalize(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(normalize_map(map)),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize).collect()),
        scalar => scalar,
    }
}

/// [`normalize`] for an optional payload; absent and `null` both map to `None`.
pub fn normalize_payload(value: Option<Value>) -> Option<Value> {
    match value {
        None | Some(Value::Null) => None,
        Some(value) => Some(normalize(value)),
    }
}

/// Lowercase the first character of `key`, leaving the rest as-is.
pub(crate) fn lower_first(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn normalize_map(map: Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::with_capacity(map.len());
    for (key, value) in map {
        // On collision ("Name" and "name") the later value wins and keeps
        // the earlier slot.
        out.insert(lower_first(&key), normalize(value));
    }

    if !out.contains_key(ID_FIELD) {
        if let Some(id) = out.get(DOCUMENT_ID_FIELD).and_then(identifier_string) {
            out.insert(ID_FIELD.to_string(), Value::String(id));
        }
    }

    out
}

fn identifier_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
