// Store error types

use thiserror::Error;

use crate::validation::ValidationErrors;

/// Errors returned by store mutations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Invalid task: {0}")]
    Validation(#[from] ValidationErrors),
}

impl StoreError {
    /// Check if the target task was absent
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }

    /// Per-field errors, if this is a validation failure
    pub fn validation(&self) -> Option<&ValidationErrors> {
        match self {
            StoreError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
