//! Controller-specific error types.
//!
//! `MigrationError` is what a migration pass reports back to its caller;
//! every variant except `Cancelled` names the legacy profile it concerns.
//! `ControllerError` wraps it for the host binary alongside startup and
//! watch failures.

use profile_client::ProfileClientError;
use thiserror::Error;

/// Errors from migrating dashboard hardware profiles.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Listing legacy profiles failed
    #[error("Failed to list dashboard hardware profiles: {0}")]
    Discovery(#[source] ProfileClientError),

    /// Legacy profile could not be converted
    #[error("Failed to convert dashboard hardware profile {profile}: {reason}")]
    Transform { profile: String, reason: String },

    /// Creating or updating the infrastructure profile failed
    #[error("Failed to persist infrastructure hardware profile for {profile}: {source}")]
    Persist {
        profile: String,
        source: ProfileClientError,
    },

    /// Infrastructure profile is persisted but the legacy profile could
    /// not be marked; the next pass takes the update path
    #[error("Migrated {profile} but failed to mark the dashboard hardware profile: {source}")]
    Mark {
        profile: String,
        source: ProfileClientError,
    },

    /// Caller cancelled the pass
    #[error("Migration cancelled")]
    Cancelled,
}

/// Errors that can occur in the Hardware Profile Controller.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// Kubernetes API error
    #[error("Kubernetes error: {0}")]
    Kube(#[from] kube::Error),

    /// Migration pass or single-profile migration failed
    #[error(transparent)]
    Migration(#[from] MigrationError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Resource watch failed
    #[error("Resource watch failed: {0}")]
    Watch(String),
}
