//! Migration steps
//!
//! Per legacy profile: skip if marked, convert, persist the infrastructure
//! profile (create, or merge into the existing one), then mark the legacy
//! profile. The marker is only written after the target is persisted.

use super::{Reconciler, cancellable};
use crate::converter::{self, profile_key};
use crate::error::MigrationError;
use crds::annotations::{self, MIGRATED_TO};
use crds::{DashboardHardwareProfile, HardwareProfile};
use std::fmt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// What happened to a single legacy profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileOutcome {
    /// Already carried the migration marker
    Skipped,
    /// Infrastructure profile was created
    Created,
    /// Existing infrastructure profile was updated
    Updated,
    /// Existing infrastructure profile already matched; only the marker was written
    UpToDate,
}

/// Per-pass counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationSummary {
    pub created: usize,
    pub updated: usize,
    pub up_to_date: usize,
    pub skipped: usize,
}

impl MigrationSummary {
    pub fn record(&mut self, outcome: ProfileOutcome) {
        match outcome {
            ProfileOutcome::Skipped => self.skipped += 1,
            ProfileOutcome::Created => self.created += 1,
            ProfileOutcome::Updated => self.updated += 1,
            ProfileOutcome::UpToDate => self.up_to_date += 1,
        }
    }

    /// Number of legacy profiles migrated in this pass
    pub fn migrated(&self) -> usize {
        self.created + self.updated + self.up_to_date
    }
}

impl fmt::Display for MigrationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} created, {} updated, {} up to date, {} skipped",
            self.created, self.updated, self.up_to_date, self.skipped
        )
    }
}

fn is_marked(legacy: &DashboardHardwareProfile) -> bool {
    legacy
        .metadata
        .annotations
        .as_ref()
        .is_some_and(|a| a.contains_key(MIGRATED_TO))
}

impl Reconciler {
    /// Migrates every legacy profile matched by the reconciler's selector.
    ///
    /// The first failing profile aborts the pass. Profiles handled before
    /// it stay migrated and are skipped on the next pass.
    pub async fn migrate(
        &self,
        cancel: &CancellationToken,
    ) -> Result<MigrationSummary, MigrationError> {
        info!("Starting hardware profile migration pass...");

        let listing = self.client.list_dashboard_profiles(&self.selector);
        let legacy_profiles = cancellable(cancel, listing)
            .await?
            .map_err(|e| {
                warn!("Failed to list dashboard hardware profiles: {}", e);
                MigrationError::Discovery(e)
            })?;

        info!("Found {} dashboard hardware profiles", legacy_profiles.len());

        let mut summary = MigrationSummary::default();
        for legacy in &legacy_profiles {
            if cancel.is_cancelled() {
                info!("Migration pass cancelled after {}", summary);
                return Err(MigrationError::Cancelled);
            }
            let outcome = self.migrate_profile(legacy, cancel).await?;
            summary.record(outcome);
        }

        info!(
            "Migration pass complete, {} profiles migrated: {}",
            summary.migrated(),
            summary
        );
        Ok(summary)
    }

    /// Migrates a single legacy profile.
    pub async fn migrate_profile(
        &self,
        legacy: &DashboardHardwareProfile,
        cancel: &CancellationToken,
    ) -> Result<ProfileOutcome, MigrationError> {
        let key = profile_key(legacy);

        if is_marked(legacy) {
            debug!("Dashboard hardware profile {} already migrated, skipping", key);
            return Ok(ProfileOutcome::Skipped);
        }

        let converted = converter::convert(legacy, &self.domain)?;
        let outcome = self.persist_target(&key, converted, cancel).await?;
        self.mark_migrated(&key, legacy, cancel).await?;

        info!("Migrated dashboard hardware profile {} ({:?})", key, outcome);
        Ok(outcome)
    }

    /// Creates the infrastructure profile, or merges into the one that
    /// already exists under the same namespace/name.
    async fn persist_target(
        &self,
        key: &str,
        converted: HardwareProfile,
        cancel: &CancellationToken,
    ) -> Result<ProfileOutcome, MigrationError> {
        let persist = |source| MigrationError::Persist {
            profile: key.to_string(),
            source,
        };
        // convert() guarantees both are set
        let namespace = converted.metadata.namespace.clone().unwrap_or_default();
        let name = converted.metadata.name.clone().unwrap_or_default();

        match cancellable(cancel, self.client.get_hardware_profile(&namespace, &name)).await? {
            Ok(existing) => {
                debug!("Infrastructure hardware profile {} exists, updating", key);
                return self.update_target(key, &existing, &converted, cancel).await;
            }
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(persist(e)),
        }

        match cancellable(cancel, self.client.create_hardware_profile(&converted)).await? {
            Ok(_) => {
                debug!("Created infrastructure hardware profile {}", key);
                Ok(ProfileOutcome::Created)
            }
            Err(e) if e.is_already_exists() => {
                warn!(
                    "Infrastructure hardware profile {} appeared concurrently, updating instead",
                    key
                );
                let lookup = self.client.get_hardware_profile(&namespace, &name);
                let existing = cancellable(cancel, lookup)
                    .await?
                    .map_err(persist)?;
                self.update_target(key, &existing, &converted, cancel).await
            }
            Err(e) => Err(persist(e)),
        }
    }

    async fn update_target(
        &self,
        key: &str,
        existing: &HardwareProfile,
        converted: &HardwareProfile,
        cancel: &CancellationToken,
    ) -> Result<ProfileOutcome, MigrationError> {
        let merged = converter::merge_into_existing(existing, converted);
        if converter::is_unchanged(existing, &merged) {
            debug!("Infrastructure hardware profile {} is up to date", key);
            return Ok(ProfileOutcome::UpToDate);
        }

        cancellable(cancel, self.client.update_hardware_profile(&merged))
            .await?
            .map_err(|source| MigrationError::Persist {
                profile: key.to_string(),
                source,
            })?;
        debug!("Updated infrastructure hardware profile {}", key);
        Ok(ProfileOutcome::Updated)
    }

    /// Writes the `migrated-to` marker onto the legacy profile.
    async fn mark_migrated(
        &self,
        key: &str,
        legacy: &DashboardHardwareProfile,
        cancel: &CancellationToken,
    ) -> Result<(), MigrationError> {
        let name = legacy.metadata.name.as_deref().unwrap_or_default();
        let mut marked = legacy.clone();
        marked
            .metadata
            .annotations
            .get_or_insert_with(Default::default)
            .insert(MIGRATED_TO.to_string(), annotations::migrated_to_value(&self.domain, name));

        cancellable(cancel, self.client.update_dashboard_profile(&marked))
            .await?
            .map_err(|source| {
                warn!(
                    "Infrastructure hardware profile for {} persisted but marking failed: {}",
                    key, source
                );
                MigrationError::Mark {
                    profile: key.to_string(),
                    source,
                }
            })?;
        Ok(())
    }
}
