//! Error types for the HR assistant.

use rota_core::RotaError;

/// Errors from the query pipeline.
///
/// Classification and answer generation never fail; these cover input
/// validation and the record store only.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("assistant is disabled")]
    Disabled,
    #[error("query cannot be empty")]
    EmptyQuery,
    #[error("query exceeds maximum length of {0} characters")]
    QueryTooLong(usize),
    #[error("store error: {0}")]
    Store(String),
}

impl From<RotaError> for AssistantError {
    fn from(err: RotaError) -> Self {
        AssistantError::Store(err.to_string())
    }
}
