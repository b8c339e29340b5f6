//! ProfileClient trait for mocking
//!
//! This trait abstracts cluster access so the migration reconciler can be
//! unit tested without an API server.

use crate::error::ProfileClientError;
use crate::selector::ListSelector;
use crds::{DashboardHardwareProfile, HardwareProfile};

/// Trait for hardware profile operations against the control plane
///
/// Semantics follow the Kubernetes API: reads are consistent with prior
/// writes through the same client, and updates are rejected with
/// [`ProfileClientError::Conflict`] when `metadata.resourceVersion` is
/// stale.
#[async_trait::async_trait]
pub trait ProfileClientTrait: Send + Sync {
    /// List legacy profiles matching the selector
    async fn list_dashboard_profiles(
        &self,
        selector: &ListSelector,
    ) -> Result<Vec<DashboardHardwareProfile>, ProfileClientError>;

    /// Replace a legacy profile (used to write the migration marker)
    async fn update_dashboard_profile(
        &self,
        profile: &DashboardHardwareProfile,
    ) -> Result<DashboardHardwareProfile, ProfileClientError>;

    /// Fetch an infrastructure profile, `NotFound` when absent
    async fn get_hardware_profile(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<HardwareProfile, ProfileClientError>;

    /// Create an infrastructure profile, `AlreadyExists` on collision
    async fn create_hardware_profile(
        &self,
        profile: &HardwareProfile,
    ) -> Result<HardwareProfile, ProfileClientError>;

    /// Replace an infrastructure profile
    async fn update_hardware_profile(
        &self,
        profile: &HardwareProfile,
    ) -> Result<HardwareProfile, ProfileClientError>;
}
