//! Assertion helpers used by the scenarios.
//!
//! Each helper returns `Err(ScenarioError::Assertion(..))` with a readable
//! message instead of panicking, so one failed check fails one scenario and
//! the run carries on.

use std::fmt::{Debug, Display};

use sdk::{ApiError, ApiResult};
use serde_json::Value;

/// Why a scenario stopped early.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("{0}")]
    Assertion(String),

    /// An SDK call failed where the scenario expected it to succeed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

pub type ScenarioResult<T = ()> = Result<T, ScenarioError>;

pub fn ensure(condition: bool, message: impl Into<String>) -> ScenarioResult {
    if condition {
        Ok(())
    } else {
        Err(ScenarioError::Assertion(message.into()))
    }
}

pub fn ensure_true(value: Option<bool>, field: &str) -> ScenarioResult {
    ensure(value == Some(true), format!("{field} should be true"))
}

pub fn ensure_eq<A, E>(actual: A, expected: E, field: &str) -> ScenarioResult
where
    A: PartialEq<E> + Debug,
    E: Debug,
{
    ensure(
        actual == expected,
        format!("{field} expected {expected:?}, got {actual:?}"),
    )
}

/// Present means the value exists and is not JSON `null`.
pub fn ensure_present<'a>(value: Option<&'a Value>, field: &str) -> ScenarioResult<&'a Value> {
    match value {
        Some(value) if !value.is_null() => Ok(value),
        _ => Err(ScenarioError::Assertion(format!("{field} should not be null"))),
    }
}

pub fn ensure_gt<T>(actual: T, bound: T, field: &str) -> ScenarioResult
where
    T: PartialOrd + Display,
{
    ensure(actual > bound, format!("{field} expected > {bound}, got {actual}"))
}

/// Length of a JSON array field, failing when it is missing or not an array.
pub fn array_len(value: Option<&Value>, field: &str) -> ScenarioResult<usize> {
    ensure_present(value, field)?
        .as_array()
        .map(Vec::len)
        .ok_or_else(|| ScenarioError::Assertion(format!("{field} should be an array")))
}

/// Length of a JSON object field, failing when it is missing or not an object.
pub fn object_len(value: Option<&Value>, field: &str) -> ScenarioResult<usize> {
    ensure_present(value, field)?
        .as_object()
        .map(|map| map.len())
        .ok_or_else(|| ScenarioError::Assertion(format!("{field} should be an object")))
}

/// Require the call to have failed with `status`; returns the error for
/// further checks.
pub fn expect_status<T>(result: ApiResult<T>, status: u16) -> ScenarioResult<ApiError> {
    match result {
        Ok(_) => Err(ScenarioError::Assertion(format!(
            "expected an error with status {status}, but the request succeeded"
        ))),
        Err(err) if err.status_code() == status => Ok(err),
        Err(err) => Err(ScenarioError::Assertion(format!(
            "error.status_code expected {status}, got {} ({})",
            err.status_code(),
            err.message()
        ))),
    }
}
