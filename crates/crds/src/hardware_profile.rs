//! Infrastructure HardwareProfile CRD
//!
//! Replacement for the dashboard-owned kind. Scheduling constraints move
//! into `spec.scheduling`, while display metadata lives in annotations.

use crate::identifiers::HardwareIdentifier;
use crate::scheduling::SchedulingSpec;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
#[kube(
    group = "infrastructure.opendatahub.io",
    version = "v1alpha1",
    kind = "HardwareProfile",
    plural = "hardwareprofiles",
    derive = "PartialEq",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct HardwareProfileSpec {
    /// Resources exposed to workloads
    #[serde(default)]
    pub identifiers: Vec<HardwareIdentifier>,

    /// How workloads using this profile are scheduled
    #[serde(rename = "scheduling", default, skip_serializing_if = "Option::is_none")]
    pub scheduling_spec: Option<SchedulingSpec>,
}
