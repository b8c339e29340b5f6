//! Scheduling constraints
//!
//! A hardware profile either pins workloads to nodes (node selector plus
//! tolerations) or hands them to a Kueue local queue. The `type` field
//! says which payload is populated.

pub use k8s_openapi::api::core::v1::Toleration;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which scheduling strategy a profile uses
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum SchedulingType {
    /// Node selector and tolerations
    Node,
    /// Kueue local queue
    Queue,
}

/// Node-scheduling payload
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NodeSchedulingSpec {
    /// Labels a node must carry
    #[serde(default)]
    pub node_selector: BTreeMap<String, String>,

    /// Taints the workload tolerates
    #[serde(default)]
    pub tolerations: Vec<Toleration>,
}

/// Queue-scheduling payload
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct KueueSchedulingSpec {
    /// Kueue LocalQueue workloads are submitted to
    pub local_queue_name: String,

    /// WorkloadPriorityClass applied to submitted workloads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_class: Option<String>,
}

/// Scheduling constraints of a `HardwareProfile`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingSpec {
    /// Discriminator selecting `node` or `kueue`
    #[serde(rename = "type")]
    pub scheduling_type: SchedulingType,

    /// Populated when `type` is `Node`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<NodeSchedulingSpec>,

    /// Populated when `type` is `Queue`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kueue: Option<KueueSchedulingSpec>,
}

impl SchedulingSpec {
    /// Node-scheduling variant
    pub fn node(node: NodeSchedulingSpec) -> Self {
        Self {
            scheduling_type: SchedulingType::Node,
            node: Some(node),
            kueue: None,
        }
    }

    /// Queue-scheduling variant
    pub fn queue(kueue: KueueSchedulingSpec) -> Self {
        Self {
            scheduling_type: SchedulingType::Queue,
            node: None,
            kueue: Some(kueue),
        }
    }

    pub fn is_node(&self) -> bool {
        self.scheduling_type == SchedulingType::Node
    }
}
