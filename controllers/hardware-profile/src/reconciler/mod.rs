//! Migration reconciler for dashboard hardware profiles.
//!
//! - `migration`: the per-pass and per-profile migration steps
//!
//! The reconciler owns no cluster state of its own. Everything it needs
//! to stay idempotent across passes lives in the `migrated-to` annotation
//! on each legacy profile.

pub mod migration;

use crate::backoff::FibonacciBackoff;
use crate::error::MigrationError;
use profile_client::{ListSelector, ProfileClientTrait};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::warn;

pub use migration::{MigrationSummary, ProfileOutcome};

/// Backoff state for a legacy profile
#[derive(Debug, Clone)]
struct BackoffState {
    backoff: FibonacciBackoff,
    error_count: u32,
}

impl BackoffState {
    fn new() -> Self {
        Self {
            backoff: FibonacciBackoff::new(1, 10), // 1 minute min, 10 minutes max
            error_count: 0,
        }
    }
}

/// Migrates dashboard hardware profiles to infrastructure hardware profiles.
pub struct Reconciler {
    pub(crate) client: Box<dyn ProfileClientTrait + Send + Sync>,
    /// Domain embedded in marker and provenance values
    pub(crate) domain: String,
    /// Which legacy profiles a pass lists
    pub(crate) selector: ListSelector,
    /// Error tracking per legacy profile (namespace/name -> BackoffState)
    backoff_states: Arc<Mutex<HashMap<String, BackoffState>>>,
}

impl Reconciler {
    /// Creates a new reconciler instance.
    pub fn new(
        client: impl ProfileClientTrait + Send + Sync + 'static,
        domain: impl Into<String>,
        selector: ListSelector,
    ) -> Self {
        Self {
            client: Box::new(client),
            domain: domain.into(),
            selector,
            backoff_states: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Records a failed migration and returns how long to wait before the
    /// next attempt, together with the consecutive error count.
    pub fn record_failure(&self, profile_key: &str) -> (Duration, u32) {
        match self.backoff_states.lock() {
            Ok(mut states) => {
                let state = states
                    .entry(profile_key.to_string())
                    .or_insert_with(BackoffState::new);
                state.error_count += 1;
                (state.backoff.next_backoff(), state.error_count)
            }
            Err(e) => {
                warn!("Failed to lock backoff_states: {}, using default backoff", e);
                (Duration::from_secs(60), 0)
            }
        }
    }

    /// Reset error tracking for a profile (on successful migration)
    pub fn reset_failures(&self, profile_key: &str) {
        if let Ok(mut states) = self.backoff_states.lock() {
            states.remove(profile_key);
        }
    }

    /// Drop error tracking for profiles `is_live` no longer reports
    pub fn retain_failures(&self, is_live: impl Fn(&str) -> bool) {
        if let Ok(mut states) = self.backoff_states.lock() {
            states.retain(|key, _| is_live(key));
        }
    }

    /// Number of profiles currently tracked as failing
    pub fn failing_profiles(&self) -> usize {
        self.backoff_states.lock().map(|states| states.len()).unwrap_or(0)
    }
}

/// Runs `fut` unless `cancel` fires first.
pub(crate) async fn cancellable<T>(
    cancel: &CancellationToken,
    fut: impl Future<Output = T>,
) -> Result<T, MigrationError> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(MigrationError::Cancelled),
        out = fut => Ok(out),
    }
}
