//! Dashboard HardwareProfile CRD (legacy)
//!
//! Created and edited by the dashboard. Controllers only ever touch its
//! annotations, to record that the profile has been migrated.

use crate::identifiers::HardwareIdentifier;
use crate::scheduling::Toleration;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
#[kube(
    group = "dashboard.opendatahub.io",
    version = "v1alpha1",
    kind = "HardwareProfile",
    root = "DashboardHardwareProfile",
    plural = "hardwareprofiles",
    derive = "PartialEq",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct DashboardHardwareProfileSpec {
    /// Name shown in the dashboard
    pub display_name: String,

    /// Whether users may select this profile
    pub enabled: bool,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Labels a node must carry
    #[serde(default)]
    pub node_selector: BTreeMap<String, String>,

    /// Taints the workload tolerates
    #[serde(default)]
    pub tolerations: Vec<Toleration>,

    /// Resources exposed to workloads
    #[serde(default)]
    pub identifiers: Vec<HardwareIdentifier>,
}
