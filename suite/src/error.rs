//! Error types for scenario execution.

use bookcart_core::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    /// A client call failed before any assertion could run.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// An expectation about the server's behavior did not hold.
    #[error("Assertion failed: {0}")]
    Assertion(String),
}

pub type ScenarioResult<T = ()> = Result<T, ScenarioError>;

/// Fails with `message` unless `condition` holds.
pub fn ensure(condition: bool, message: impl FnOnce() -> String) -> ScenarioResult {
    if condition {
        Ok(())
    } else {
        Err(ScenarioError::Assertion(message()))
    }
}

/// Fails with an expected/actual message unless the values are equal.
pub fn ensure_eq<T>(what: &str, expected: T, actual: T) -> ScenarioResult
where
    T: PartialEq + std::fmt::Debug,
{
    ensure(expected == actual, || {
        format!("{what} mismatch: expected {expected:?}, got {actual:?}")
    })
}

/// Fails unless the response carries `expected` as status.
pub fn ensure_status(what: &str, expected: u16, actual: u16) -> ScenarioResult {
    ensure(expected == actual, || {
        format!("{what}: expected status {expected}, got {actual}")
    })
}
