//! Error types for workflow services

use thiserror::Error;

/// Result type alias using WorkflowServiceError
pub type Result<T> = std::result::Result<T, WorkflowServiceError>;

/// Result type alias for store backends
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by [`crate::WorkflowService`]
#[derive(Debug, Error)]
pub enum WorkflowServiceError {
    /// No workflow with the requested id
    #[error("Workflow not found")]
    NotFound { id: String },

    /// Request failed validation
    #[error("{0}")]
    Validation(String),

    /// Backing store failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl WorkflowServiceError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Errors raised by a [`crate::WorkflowStore`] backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record with this id already exists
    #[error("Duplicate workflow id: {0}")]
    DuplicateId(String),

    /// Backend cannot serve the request
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
