//! Hardware profile client errors

use thiserror::Error;

/// Errors that can occur when reading or writing hardware profiles
#[derive(Debug, Error)]
pub enum ProfileClientError {
    /// Kubernetes client or transport error not covered below
    #[error("Kubernetes error: {0}")]
    Kube(#[from] kube::Error),

    /// Object does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Create collided with an existing object
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Update carried a stale resourceVersion
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Request rejected for any other reason
    #[error("API error: {0}")]
    Api(String),
}

impl ProfileClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}
