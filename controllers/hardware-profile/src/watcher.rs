//! Kubernetes resource watcher.
//!
//! Drives `Reconciler::migrate_profile` from a `kube_runtime::Controller`
//! over dashboard hardware profiles, so profiles created after startup
//! are migrated as they appear.

use crate::converter::profile_key;
use crate::error::{ControllerError, MigrationError};
use crate::reconciler::Reconciler;
use crds::DashboardHardwareProfile;
use futures::StreamExt;
use kube::Api;
use kube_runtime::controller::{Action, Config as ControllerConfig};
use kube_runtime::reflector::Store;
use kube_runtime::{Controller, watcher};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Shared state handed to every reconcile call
pub(crate) struct Context {
    pub(crate) reconciler: Arc<Reconciler>,
    pub(crate) cancel: CancellationToken,
    /// Controller's cache of live legacy profiles
    pub(crate) store: Store<DashboardHardwareProfile>,
}

impl Context {
    /// Forgets backoff state of profiles that were deleted while failing.
    pub(crate) fn prune_backoff(&self) {
        let live: HashSet<String> = self.store.state().iter().map(|p| profile_key(p)).collect();
        self.reconciler.retain_failures(|key| live.contains(key));
        debug!(
            "{} dashboard hardware profiles in backoff",
            self.reconciler.failing_profiles()
        );
    }
}

async fn reconcile(
    profile: Arc<DashboardHardwareProfile>,
    ctx: Arc<Context>,
) -> Result<Action, MigrationError> {
    let key = profile_key(&profile);
    debug!("Reconciling dashboard hardware profile {}", key);

    ctx.reconciler.migrate_profile(&profile, &ctx.cancel).await?;
    ctx.reconciler.reset_failures(&key);
    ctx.prune_backoff();

    // Marked profiles only need another look if they change again
    Ok(Action::await_change())
}

fn error_policy(
    profile: Arc<DashboardHardwareProfile>,
    error: &MigrationError,
    ctx: Arc<Context>,
) -> Action {
    let key = profile_key(&profile);
    let (delay, error_count) = ctx.reconciler.record_failure(&key);
    warn!(
        "Migration of {} failed ({} consecutive errors): {}; retrying in {}s",
        key,
        error_count,
        error,
        delay.as_secs()
    );
    Action::requeue(delay)
}

/// Watches dashboard hardware profiles until `cancel` fires.
///
/// Uses the reconciler's label selector so the watch sees the same
/// profiles a full migration pass lists.
pub async fn watch_dashboard_profiles(
    api: Api<DashboardHardwareProfile>,
    reconciler: Arc<Reconciler>,
    cancel: CancellationToken,
) -> Result<(), ControllerError> {
    info!("Starting dashboard HardwareProfile watcher");

    let mut watcher_config = watcher::Config::default();
    if let Some(labels) = reconciler.selector.label_selector.as_deref() {
        watcher_config = watcher_config.labels(labels);
    }

    // Debounce waits 5 seconds after the last event before reconciling,
    // concurrency limits to 3 concurrent migrations
    let controller_config = ControllerConfig::default()
        .debounce(Duration::from_secs(5))
        .concurrency(3);

    let controller = Controller::new(api, watcher_config)
        .with_config(controller_config)
        .graceful_shutdown_on(cancel.clone().cancelled_owned());

    let ctx = Arc::new(Context {
        reconciler,
        cancel,
        store: controller.store(),
    });

    controller
        .run(reconcile, error_policy, ctx)
        .for_each(|res| async move {
            match res {
                Ok((obj, _)) => debug!("Reconciled dashboard HardwareProfile {}", obj.name),
                Err(e) => error!("Controller error for dashboard HardwareProfile: {}", e),
            }
        })
        .await;

    info!("Dashboard HardwareProfile watcher stopped");
    Ok(())
}
