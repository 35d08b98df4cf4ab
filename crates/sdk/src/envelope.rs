//! Canonical response envelope.
//!
//! Every Verbex endpoint answers with the same wrapper (`Guid`, `Success`,
//! `StatusCode`, `Data`, ...). Builds disagree on casing, so fields are read
//! through [`FieldLookup`], which tries the capitalized name first and then
//! the lowercase-first name.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::normalize::{lower_first, normalize_payload};

/// Two-step field accessor over a raw server payload.
///
/// `get("StatusCode")` returns the value under `StatusCode` when present and
/// not `null`, otherwise the value under `statusCode`, otherwise `None`.
/// Callers apply their own default on `None`.
#[derive(Debug, Clone, Copy)]
pub struct FieldLookup<'a> {
    payload: &'a Map<String, Value>,
}

impl<'a> FieldLookup<'a> {
    pub fn new(payload: &'a Map<String, Value>) -> Self {
        Self { payload }
    }

    /// Look up `canonical`, falling back to its lowercase-first spelling.
    pub fn get(&self, canonical: &str) -> Option<&'a Value> {
        self.present(canonical)
            .or_else(|| self.present(&lower_first(canonical)))
    }

    pub fn string(&self, canonical: &str) -> Option<String> {
        self.get(canonical).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    pub fn bool(&self, canonical: &str) -> Option<bool> {
        self.get(canonical).and_then(Value::as_bool)
    }

    pub fn i64(&self, canonical: &str) -> Option<i64> {
        self.get(canonical).and_then(|value| match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    pub fn f64(&self, canonical: &str) -> Option<f64> {
        self.get(canonical).and_then(|value| match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    pub fn status_code(&self, canonical: &str) -> Option<u16> {
        self.i64(canonical).and_then(|code| u16::try_from(code).ok())
    }

    fn present(&self, key: &str) -> Option<&'a Value> {
        self.payload.get(key).filter(|value| !value.is_null())
    }
}

/// Structured result of a single Verbex call.
///
/// Built once per response and never mutated afterwards. `success` is always
/// `false` when `status_code >= 400`, whatever the server claimed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    correlation_id: Option<String>,
    success: bool,
    timestamp_utc: Option<String>,
    status_code: u16,
    error_message: Option<String>,
    data: Option<Value>,
    total_count: Option<i64>,
    processing_time_ms: Option<f64>,
    raw: Value,
}

impl ResponseEnvelope {
    /// Build from a decoded server payload.
    ///
    /// A payload without a status code gets `0`; one without a success flag
    /// is treated as a failure.
    pub fn from_payload(payload: Value) -> Self {
        Self::build(payload, None)
    }

    /// Build from a transport-level response.
    ///
    /// Bodies that are not JSON degrade to a fallback payload carrying the
    /// transport status and the raw body text as `data`. When the decoded
    /// payload omits its status code the transport status is used instead.
    pub fn from_transport(status: u16, body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(payload) => Self::build(payload, Some(status)),
            Err(err) => {
                tracing::debug!(
                    status,
                    error = %err,
                    "response body is not JSON, using fallback envelope"
                );
                let data = if body.is_empty() {
                    Value::Null
                } else {
                    Value::String(body.to_string())
                };
                Self::build(fallback_payload(status, data), Some(status))
            }
        }
    }

    fn build(payload: Value, transport_status: Option<u16>) -> Self {
        let map = match payload {
            Value::Object(map) => map,
            // A bare array/scalar body is the data of an otherwise empty envelope.
            other => {
                let status = transport_status.unwrap_or(0);
                match fallback_payload(status, other) {
                    Value::Object(map) => map,
                    _ => Map::new(),
                }
            }
        };

        let fields = FieldLookup::new(&map);
        let status_code = fields
            .status_code("StatusCode")
            .or(transport_status)
            .unwrap_or(0);
        let success = fields.bool("Success").unwrap_or(false) && status_code < 400;

        let envelope = Self {
            correlation_id: fields.string("Guid"),
            success,
            timestamp_utc: fields.string("TimestampUtc"),
            status_code,
            error_message: fields.string("ErrorMessage"),
            data: normalize_payload(fields.get("Data").cloned()),
            total_count: fields.i64("TotalCount"),
            processing_time_ms: fields.f64("ProcessingTimeMs"),
            raw: Value::Null,
        };

        Self {
            raw: Value::Object(map),
            ..envelope
        }
    }

    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn timestamp_utc(&self) -> Option<&str> {
        self.timestamp_utc.as_deref()
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Normalized payload; `None` only when the server sent none.
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<Value> {
        self.data
    }

    pub fn total_count(&self) -> Option<i64> {
        self.total_count
    }

    pub fn processing_time_ms(&self) -> Option<f64> {
        self.processing_time_ms
    }

    /// The payload exactly as decoded (or synthesized on decode failure).
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Field of the normalized payload, by normalized (lowercase-first) name.
    pub fn data_field(&self, name: &str) -> Option<&Value> {
        self.data.as_ref().and_then(|data| data.get(name))
    }

    pub fn data_str(&self, name: &str) -> Option<&str> {
        self.data_field(name).and_then(Value::as_str)
    }

    pub fn data_i64(&self, name: &str) -> Option<i64> {
        self.data_field(name).and_then(Value::as_i64)
    }

    pub fn data_bool(&self, name: &str) -> Option<bool> {
        self.data_field(name).and_then(Value::as_bool)
    }

    pub fn data_array(&self, name: &str) -> Option<&Vec<Value>> {
        self.data_field(name).and_then(Value::as_array)
    }
}

fn fallback_payload(status: u16, data: Value) -> Value {
    let mut map = Map::new();
    map.insert("success".to_string(), Value::Bool(status < 400));
    map.insert("statusCode".to_string(), Value::from(status));
    map.insert("data".to_string(), data);
    Value::Object(map)
}
