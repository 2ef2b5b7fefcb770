//! Error types for the article assist core
//!
//! One taxonomy shared by the gateway, the mutation adapter and the panel
//! state machine. Remote failures never escape the gateway; they are turned
//! into flagged fallback results before reaching the UI layer.

use thiserror::Error;

/// Top-level editor error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    /// Caller programming error (empty text, unknown transform kind, action
    /// invoked from the wrong state)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Network or HTTP failure talking to a backend; always recoverable via fallback
    #[error("Remote backend unavailable: {0}")]
    RemoteUnavailable(String),

    /// The frozen range no longer addresses valid text in the current document
    #[error("Stale range {from}..{to} (document size {size})")]
    StaleRange { from: usize, to: usize, size: usize },

    /// A search returned nothing; rendered as an empty state, not a failure
    #[error("No match: {0}")]
    NoMatch(String),
}

impl EditorError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        EditorError::InvalidInput(msg.into())
    }

    pub fn remote(msg: impl Into<String>) -> Self {
        EditorError::RemoteUnavailable(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, EditorError>;
