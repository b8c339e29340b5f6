//! Test utilities for unit testing the migration reconciler
//!
//! This module provides helpers for creating test profiles and wiring a
//! reconciler to the in-memory client.

use crate::reconciler::Reconciler;
use crds::annotations::DEFAULT_DOMAIN;
use crds::*;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use profile_client::{ListSelector, MockProfileClient};
use std::collections::BTreeMap;

fn test_meta(name: &str, namespace: &str) -> ObjectMeta {
    ObjectMeta {
        name: Some(name.to_string()),
        namespace: Some(namespace.to_string()),
        ..Default::default()
    }
}

/// Helper to create a legacy profile with empty collections
pub fn create_test_dashboard_profile(
    name: &str,
    namespace: &str,
    enabled: bool,
) -> DashboardHardwareProfile {
    DashboardHardwareProfile {
        metadata: test_meta(name, namespace),
        spec: DashboardHardwareProfileSpec {
            display_name: format!("{} display", name),
            enabled,
            description: format!("{} description", name),
            node_selector: BTreeMap::new(),
            tolerations: vec![],
            identifiers: vec![],
        },
    }
}

/// Helper to create a legacy profile with a GPU identifier, selector and toleration
pub fn create_test_gpu_dashboard_profile(name: &str, namespace: &str) -> DashboardHardwareProfile {
    let mut profile = create_test_dashboard_profile(name, namespace, true);
    profile.spec.node_selector =
        BTreeMap::from([("nvidia.com/gpu.present".to_string(), "true".to_string())]);
    profile.spec.tolerations = vec![Toleration {
        key: Some("nvidia.com/gpu".to_string()),
        operator: Some("Exists".to_string()),
        effect: Some("NoSchedule".to_string()),
        ..Default::default()
    }];
    profile.spec.identifiers = vec![
        create_test_identifier("CPU", "cpu", IdentifierResourceType::Cpu),
        create_test_identifier("GPU", "nvidia.com/gpu", IdentifierResourceType::Accelerator),
    ];
    profile
}

/// Helper to create a hardware identifier with counts 1..=4, default 1
pub fn create_test_identifier(
    display_name: &str,
    identifier: &str,
    resource_type: IdentifierResourceType,
) -> HardwareIdentifier {
    HardwareIdentifier {
        display_name: display_name.to_string(),
        identifier: identifier.to_string(),
        min_count: IntOrString::Int(1),
        max_count: Some(IntOrString::Int(4)),
        default_count: IntOrString::Int(1),
        resource_type: Some(resource_type),
    }
}

/// Helper to create an infrastructure profile carrying `annotations`
pub fn create_test_hardware_profile(
    name: &str,
    namespace: &str,
    annotations: &[(&str, &str)],
) -> HardwareProfile {
    let mut metadata = test_meta(name, namespace);
    metadata.annotations = Some(
        annotations
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    );
    HardwareProfile {
        metadata,
        spec: HardwareProfileSpec {
            identifiers: vec![],
            scheduling_spec: Some(SchedulingSpec::queue(KueueSchedulingSpec {
                local_queue_name: "default".to_string(),
                priority_class: None,
            })),
        },
    }
}

/// Helper to build a reconciler over `client` for all namespaces
pub fn create_test_reconciler(client: &MockProfileClient) -> Reconciler {
    Reconciler::new(client.clone(), DEFAULT_DOMAIN, ListSelector::all())
}
