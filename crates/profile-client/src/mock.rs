//! Mock ProfileClient for unit testing
//!
//! In-memory stand-in for the API server. It assigns resource versions,
//! enforces optimistic concurrency on updates and counts calls per
//! operation. Failures and hooks can be armed for the next call of a
//! given operation to exercise error paths and interleavings.

use crate::error::ProfileClientError;
use crate::profile_trait::ProfileClientTrait;
use crate::selector::{LabelRequirement, ListSelector};
use crds::{DashboardHardwareProfile, HardwareProfile};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

type Key = (String, String);
type Hook = Box<dyn FnOnce(&MockProfileClient) + Send>;

/// Operations of [`ProfileClientTrait`], for counting and injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOperation {
    ListDashboard,
    UpdateDashboard,
    GetHardware,
    CreateHardware,
    UpdateHardware,
}

/// Mock ProfileClient for testing
///
/// Clones share the same store, so a test can hand one clone to the code
/// under test and inspect the outcome through another.
#[derive(Clone, Default)]
pub struct MockProfileClient {
    dashboard_profiles: Arc<Mutex<BTreeMap<Key, DashboardHardwareProfile>>>,
    hardware_profiles: Arc<Mutex<BTreeMap<Key, HardwareProfile>>>,
    calls: Arc<Mutex<HashMap<MockOperation, usize>>>,
    failures: Arc<Mutex<HashMap<MockOperation, ProfileClientError>>>,
    hooks: Arc<Mutex<HashMap<MockOperation, Hook>>>,
    resource_version: Arc<Mutex<u64>>,
}

fn key_of(meta: &ObjectMeta) -> Result<Key, ProfileClientError> {
    let namespace = meta
        .namespace
        .clone()
        .ok_or_else(|| ProfileClientError::Api("object has no namespace".to_string()))?;
    let name = meta
        .name
        .clone()
        .ok_or_else(|| ProfileClientError::Api("object has no name".to_string()))?;
    Ok((namespace, name))
}

fn matches(
    meta: &ObjectMeta,
    selector: &ListSelector,
    requirements: &[LabelRequirement<'_>],
) -> bool {
    if let Some(ns) = &selector.namespace {
        if meta.namespace.as_ref() != Some(ns) {
            return false;
        }
    }
    let no_labels = BTreeMap::new();
    let labels = meta.labels.as_ref().unwrap_or(&no_labels);
    requirements.iter().all(|r| r.matches(labels))
}

impl MockProfileClient {
    /// Create an empty mock store
    pub fn new() -> Self {
        Self::default()
    }

    fn next_resource_version(&self) -> String {
        let mut rv = self.resource_version.lock().unwrap();
        *rv += 1;
        rv.to_string()
    }

    /// Counts the call, runs an armed hook, then yields an armed failure.
    fn record(&self, op: MockOperation) -> Result<(), ProfileClientError> {
        *self.calls.lock().unwrap().entry(op).or_insert(0) += 1;
        let hook = self.hooks.lock().unwrap().remove(&op);
        if let Some(hook) = hook {
            hook(self);
        }
        match self.failures.lock().unwrap().remove(&op) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Add a legacy profile to the mock store (for test setup)
    pub fn add_dashboard_profile(&self, mut profile: DashboardHardwareProfile) {
        profile.metadata.resource_version = Some(self.next_resource_version());
        let key = key_of(&profile.metadata).unwrap();
        self.dashboard_profiles.lock().unwrap().insert(key, profile);
    }

    /// Add an infrastructure profile to the mock store (for test setup)
    pub fn add_hardware_profile(&self, mut profile: HardwareProfile) {
        profile.metadata.resource_version = Some(self.next_resource_version());
        let key = key_of(&profile.metadata).unwrap();
        self.hardware_profiles.lock().unwrap().insert(key, profile);
    }

    pub fn dashboard_profile(
        &self,
        namespace: &str,
        name: &str,
    ) -> Option<DashboardHardwareProfile> {
        self.dashboard_profiles
            .lock()
            .unwrap()
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
    }

    pub fn hardware_profile(&self, namespace: &str, name: &str) -> Option<HardwareProfile> {
        self.hardware_profiles
            .lock()
            .unwrap()
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
    }

    /// All infrastructure profiles, ordered by namespace then name
    pub fn hardware_profiles(&self) -> Vec<HardwareProfile> {
        self.hardware_profiles.lock().unwrap().values().cloned().collect()
    }

    /// Number of calls made to `op` since creation or the last reset
    pub fn calls(&self, op: MockOperation) -> usize {
        self.calls.lock().unwrap().get(&op).copied().unwrap_or(0)
    }

    /// Number of create and update calls across both kinds
    pub fn write_calls(&self) -> usize {
        self.calls(MockOperation::CreateHardware)
            + self.calls(MockOperation::UpdateHardware)
            + self.calls(MockOperation::UpdateDashboard)
    }

    pub fn reset_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Make the next call to `op` fail with `error`
    pub fn fail_next(&self, op: MockOperation, error: ProfileClientError) {
        self.failures.lock().unwrap().insert(op, error);
    }

    /// Run `hook` against the store right before the next call to `op`
    ///
    /// Useful to simulate a concurrent writer slipping in between two
    /// steps of the code under test.
    pub fn before_next(
        &self,
        op: MockOperation,
        hook: impl FnOnce(&MockProfileClient) + Send + 'static,
    ) {
        self.hooks.lock().unwrap().insert(op, Box::new(hook));
    }
}

#[async_trait::async_trait]
impl ProfileClientTrait for MockProfileClient {
    async fn list_dashboard_profiles(
        &self,
        selector: &ListSelector,
    ) -> Result<Vec<DashboardHardwareProfile>, ProfileClientError> {
        self.record(MockOperation::ListDashboard)?;
        // The API server rejects selectors it cannot parse; so do we
        let requirements = selector.requirements().map_err(ProfileClientError::Api)?;
        Ok(self
            .dashboard_profiles
            .lock()
            .unwrap()
            .values()
            .filter(|p| matches(&p.metadata, selector, &requirements))
            .cloned()
            .collect())
    }

    async fn update_dashboard_profile(
        &self,
        profile: &DashboardHardwareProfile,
    ) -> Result<DashboardHardwareProfile, ProfileClientError> {
        self.record(MockOperation::UpdateDashboard)?;
        let key = key_of(&profile.metadata)?;
        let mut store = self.dashboard_profiles.lock().unwrap();
        let current = store
            .get(&key)
            .ok_or_else(|| {
                ProfileClientError::NotFound(format!("HardwareProfile {}/{}", key.0, key.1))
            })?;
        if profile.metadata.resource_version.is_some()
            && profile.metadata.resource_version != current.metadata.resource_version
        {
            return Err(ProfileClientError::Conflict(format!(
                "HardwareProfile {}/{}",
                key.0, key.1
            )));
        }
        let mut updated = profile.clone();
        updated.metadata.resource_version = Some(self.next_resource_version());
        store.insert(key, updated.clone());
        Ok(updated)
    }

    async fn get_hardware_profile(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<HardwareProfile, ProfileClientError> {
        self.record(MockOperation::GetHardware)?;
        self.hardware_profile(namespace, name)
            .ok_or_else(|| {
                ProfileClientError::NotFound(format!("HardwareProfile {namespace}/{name}"))
            })
    }

    async fn create_hardware_profile(
        &self,
        profile: &HardwareProfile,
    ) -> Result<HardwareProfile, ProfileClientError> {
        self.record(MockOperation::CreateHardware)?;
        let key = key_of(&profile.metadata)?;
        let mut store = self.hardware_profiles.lock().unwrap();
        if store.contains_key(&key) {
            return Err(ProfileClientError::AlreadyExists(format!(
                "HardwareProfile {}/{}",
                key.0, key.1
            )));
        }
        let mut created = profile.clone();
        created.metadata.resource_version = Some(self.next_resource_version());
        store.insert(key, created.clone());
        Ok(created)
    }

    async fn update_hardware_profile(
        &self,
        profile: &HardwareProfile,
    ) -> Result<HardwareProfile, ProfileClientError> {
        self.record(MockOperation::UpdateHardware)?;
        let key = key_of(&profile.metadata)?;
        let mut store = self.hardware_profiles.lock().unwrap();
        let current = store
            .get(&key)
            .ok_or_else(|| {
                ProfileClientError::NotFound(format!("HardwareProfile {}/{}", key.0, key.1))
            })?;
        if profile.metadata.resource_version.is_some()
            && profile.metadata.resource_version != current.metadata.resource_version
        {
            return Err(ProfileClientError::Conflict(format!(
                "HardwareProfile {}/{}",
                key.0, key.1
            )));
        }
        let mut updated = profile.clone();
        updated.metadata.resource_version = Some(self.next_resource_version());
        store.insert(key, updated.clone());
        Ok(updated)
    }
}
