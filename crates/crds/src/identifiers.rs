//! Hardware identifiers
//!
//! Describes a schedulable resource (CPU, memory, an accelerator) and the
//! quantities a workload may request from it.

pub use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::{Deserialize, Serialize};

/// A resource a hardware profile exposes to workloads
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HardwareIdentifier {
    /// Human readable name shown in the dashboard
    pub display_name: String,

    /// Resource name as known to the scheduler (e.g. "nvidia.com/gpu")
    pub identifier: String,

    /// Minimum quantity a workload must request
    pub min_count: IntOrString,

    /// Maximum quantity a workload may request (unbounded when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(schema_with = "optional_int_or_string_schema")]
    pub max_count: Option<IntOrString>,

    /// Quantity preselected for new workloads
    pub default_count: IntOrString,

    /// Kind of resource, used to pick the unit shown to users
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(schema_with = "optional_resource_type_schema")]
    pub resource_type: Option<IdentifierResourceType>,
}

/// Resource category of a hardware identifier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum IdentifierResourceType {
    /// CPU cores
    #[serde(rename = "CPU")]
    Cpu,

    /// Memory, as a Kubernetes quantity
    Memory,

    /// Any extended resource (GPU, NPU, ...)
    Accelerator,
}

// The derived schema for an `Option<T>` field is an `anyOf` with a null
// branch, which a structural CRD schema does not allow. These keep the
// type at the top level and mark it nullable instead.

fn optional_int_or_string_schema(_generator: &mut SchemaGenerator) -> Schema {
    json_schema!({
        "x-kubernetes-int-or-string": true,
        "nullable": true
    })
}

fn optional_resource_type_schema(_generator: &mut SchemaGenerator) -> Schema {
    json_schema!({
        "type": "string",
        "enum": ["CPU", "Memory", "Accelerator"],
        "nullable": true
    })
}
