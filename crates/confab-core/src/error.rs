//! Error types for the Confab crates.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the Confab crates.
///
/// The session store itself is infallible by design (missing targets are
/// handled as silent no-ops); this type covers the boundaries where real
/// failures can occur, chiefly the reply source.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ConfabError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Reply source failure (backend errors, timeouts)
    #[error("Reply source error: {0}")]
    ReplySource(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ConfabError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a ReplySource error
    pub fn reply_source(message: impl Into<String>) -> Self {
        Self::ReplySource(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a reply source error
    pub fn is_reply_source(&self) -> bool {
        matches!(self, Self::ReplySource(_))
    }
}

/// Conversion from String (for error messages)
impl From<String> for ConfabError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, ConfabError>`.
pub type Result<T> = std::result::Result<T, ConfabError>;
