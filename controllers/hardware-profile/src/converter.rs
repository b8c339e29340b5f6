//! Conversion from dashboard to infrastructure hardware profiles.
//!
//! Pure functions only: the result depends on nothing but the legacy
//! profile's metadata, spec and the configured domain.

use crate::error::MigrationError;
use crds::annotations::{self, DESCRIPTION, DISABLED, DISPLAY_NAME, MIGRATED_FROM};
use crds::{
    DashboardHardwareProfile, HardwareProfile, HardwareProfileSpec, NodeSchedulingSpec,
    SchedulingSpec,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::collections::BTreeMap;

/// `namespace/name` of a legacy profile, for logs and errors
pub fn profile_key(profile: &DashboardHardwareProfile) -> String {
    format!(
        "{}/{}",
        profile.metadata.namespace.as_deref().unwrap_or("<unknown>"),
        profile.metadata.name.as_deref().unwrap_or("<unknown>")
    )
}

/// Builds the infrastructure profile that replaces `legacy`.
///
/// Name and namespace are carried over unchanged since they are the only
/// link between the two objects. Legacy annotations are copied and then
/// overlaid with `migrated-from`, `display-name`, `description` and
/// `disabled`.
pub fn convert(
    legacy: &DashboardHardwareProfile,
    domain: &str,
) -> Result<HardwareProfile, MigrationError> {
    let name = legacy
        .metadata
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| MigrationError::Transform {
            profile: profile_key(legacy),
            reason: "metadata.name is missing".to_string(),
        })?;
    let namespace = legacy
        .metadata
        .namespace
        .as_deref()
        .filter(|ns| !ns.is_empty())
        .ok_or_else(|| MigrationError::Transform {
            profile: profile_key(legacy),
            reason: "metadata.namespace is missing".to_string(),
        })?;

    let spec = &legacy.spec;
    let mut annotations = legacy.metadata.annotations.clone().unwrap_or_default();
    annotations.insert(MIGRATED_FROM.to_string(), annotations::migrated_from_value(domain, name));
    annotations.insert(DISPLAY_NAME.to_string(), spec.display_name.clone());
    annotations.insert(DESCRIPTION.to_string(), spec.description.clone());
    annotations.insert(DISABLED.to_string(), (!spec.enabled).to_string());

    Ok(HardwareProfile {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            annotations: Some(annotations),
            ..Default::default()
        },
        spec: HardwareProfileSpec {
            scheduling_spec: Some(SchedulingSpec::node(NodeSchedulingSpec {
                node_selector: spec.node_selector.clone(),
                tolerations: spec.tolerations.clone(),
            })),
            identifiers: spec.identifiers.clone(),
        },
    })
}

/// Applies a converted profile on top of one that already exists.
///
/// Annotations are merged (converted keys win, other existing keys stay);
/// scheduling and identifiers are replaced wholesale. Everything else on
/// `existing`, including its resourceVersion, is kept so the update is
/// subject to optimistic concurrency.
pub fn merge_into_existing(
    existing: &HardwareProfile,
    converted: &HardwareProfile,
) -> HardwareProfile {
    let mut annotations: BTreeMap<String, String> =
        existing.metadata.annotations.clone().unwrap_or_default();
    annotations.extend(converted.metadata.annotations.clone().unwrap_or_default());

    let mut merged = existing.clone();
    merged.metadata.annotations = Some(annotations);
    merged.spec.scheduling_spec = converted.spec.scheduling_spec.clone();
    merged.spec.identifiers = converted.spec.identifiers.clone();
    merged
}

/// True when writing `merged` would not change `existing`
pub fn is_unchanged(existing: &HardwareProfile, merged: &HardwareProfile) -> bool {
    existing.spec == merged.spec && existing.metadata.annotations == merged.metadata.annotations
}
