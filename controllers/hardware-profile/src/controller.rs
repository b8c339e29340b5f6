//! Main controller implementation.
//!
//! This module contains the `Controller` struct that wires configuration,
//! the Kubernetes client and the migration reconciler together. It runs
//! one full migration pass at startup and then, unless configured to run
//! once, keeps watching dashboard hardware profiles.

use crate::config::Config;
use crate::error::ControllerError;
use crate::reconciler::Reconciler;
use crate::watcher::watch_dashboard_profiles;
use crds::DashboardHardwareProfile;
use kube::{Api, Client};
use profile_client::{KubeProfileClient, ListSelector};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Main controller for hardware profile migration.
pub struct Controller {
    reconciler: Arc<Reconciler>,
    api: Api<DashboardHardwareProfile>,
    run_once: bool,
    cancel: CancellationToken,
}

impl Controller {
    /// Creates a new controller instance.
    pub async fn new(config: Config, cancel: CancellationToken) -> Result<Self, ControllerError> {
        info!("Initializing Hardware Profile Controller");

        // Create Kubernetes client
        let kube_client = Client::try_default().await?;

        let (api, selector) = match config.namespace.as_deref() {
            Some(ns) => (
                Api::namespaced(kube_client.clone(), ns),
                ListSelector::namespaced(ns),
            ),
            None => (Api::all(kube_client.clone()), ListSelector::all()),
        };
        let selector = match config.label_selector.as_deref() {
            Some(labels) => selector.with_labels(labels),
            None => selector,
        };

        let reconciler = Reconciler::new(
            KubeProfileClient::new(kube_client),
            config.domain,
            selector,
        );

        Ok(Self {
            reconciler: Arc::new(reconciler),
            api,
            run_once: config.run_once,
            cancel,
        })
    }

    /// Runs the controller until shutdown.
    pub async fn run(self) -> Result<(), ControllerError> {
        info!("Hardware Profile Controller running");

        match self.reconciler.migrate(&self.cancel).await {
            Ok(summary) => info!("Startup migration finished: {}", summary),
            Err(e) if self.run_once => return Err(e.into()),
            Err(e) => error!("Startup migration failed, continuing with watcher: {}", e),
        }

        if self.run_once {
            info!("RUN_ONCE set, exiting after a single migration pass");
            return Ok(());
        }
        if self.cancel.is_cancelled() {
            return Ok(());
        }

        let watcher = tokio::spawn(watch_dashboard_profiles(
            self.api,
            self.reconciler,
            self.cancel,
        ));

        watcher.await.map_err(|e| {
            ControllerError::Watch(format!("Dashboard HardwareProfile watcher panicked: {}", e))
        })?
    }
}
