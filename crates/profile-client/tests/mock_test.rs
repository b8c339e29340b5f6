//! Behaviour of the in-memory client the reconciler tests rely on

use crds::{
    DashboardHardwareProfile, DashboardHardwareProfileSpec, HardwareProfile, HardwareProfileSpec,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use profile_client::{
    ListSelector, MockOperation, MockProfileClient, ProfileClientError, ProfileClientTrait,
};
use std::collections::BTreeMap;

fn meta(namespace: &str, name: &str) -> ObjectMeta {
    ObjectMeta {
        name: Some(name.to_string()),
        namespace: Some(namespace.to_string()),
        ..Default::default()
    }
}

fn dashboard(namespace: &str, name: &str) -> DashboardHardwareProfile {
    DashboardHardwareProfile {
        metadata: meta(namespace, name),
        spec: DashboardHardwareProfileSpec::default(),
    }
}

fn hardware(namespace: &str, name: &str) -> HardwareProfile {
    HardwareProfile {
        metadata: meta(namespace, name),
        spec: HardwareProfileSpec::default(),
    }
}

#[tokio::test]
async fn test_list_filters_by_namespace_and_labels() {
    let client = MockProfileClient::new();
    let mut labelled = dashboard("team-a", "gpu");
    labelled.metadata.labels = Some(BTreeMap::from([("tier".to_string(), "gpu".to_string())]));
    client.add_dashboard_profile(labelled);
    client.add_dashboard_profile(dashboard("team-a", "cpu"));
    client.add_dashboard_profile(dashboard("team-b", "cpu"));

    let all = client.list_dashboard_profiles(&ListSelector::all()).await.unwrap();
    assert_eq!(all.len(), 3);

    let team_a = client.list_dashboard_profiles(&ListSelector::namespaced("team-a")).await.unwrap();
    assert_eq!(team_a.len(), 2);

    let gpu = client
        .list_dashboard_profiles(&ListSelector::all().with_labels("tier=gpu"))
        .await
        .unwrap();
    assert_eq!(gpu.len(), 1);
    assert_eq!(gpu[0].metadata.name.as_deref(), Some("gpu"));
    assert_eq!(client.calls(MockOperation::ListDashboard), 3);
}

#[tokio::test]
async fn test_list_supports_inequality_and_existence_terms() {
    let client = MockProfileClient::new();
    let mut labelled = dashboard("team-a", "gpu");
    labelled.metadata.labels = Some(BTreeMap::from([("tier".to_string(), "gpu".to_string())]));
    client.add_dashboard_profile(labelled);
    client.add_dashboard_profile(dashboard("team-a", "cpu"));

    let not_gpu = client
        .list_dashboard_profiles(&ListSelector::all().with_labels("tier!=gpu"))
        .await
        .unwrap();
    assert_eq!(not_gpu.len(), 1);
    assert_eq!(not_gpu[0].metadata.name.as_deref(), Some("cpu"));

    let tiered = client
        .list_dashboard_profiles(&ListSelector::all().with_labels("tier"))
        .await
        .unwrap();
    assert_eq!(tiered.len(), 1);
    assert_eq!(tiered[0].metadata.name.as_deref(), Some("gpu"));

    let untiered = client
        .list_dashboard_profiles(&ListSelector::all().with_labels("!tier"))
        .await
        .unwrap();
    assert_eq!(untiered.len(), 1);
    assert_eq!(untiered[0].metadata.name.as_deref(), Some("cpu"));
}

#[tokio::test]
async fn test_list_rejects_set_based_selector() {
    let client = MockProfileClient::new();
    client.add_dashboard_profile(dashboard("team-a", "gpu"));

    let err = client
        .list_dashboard_profiles(&ListSelector::all().with_labels("tier in (gpu,cpu)"))
        .await
        .unwrap_err();
    assert!(matches!(err, ProfileClientError::Api(_)));
}

#[tokio::test]
async fn test_create_rejects_duplicates() {
    let client = MockProfileClient::new();
    let created = client.create_hardware_profile(&hardware("ns", "a")).await.unwrap();
    assert!(created.metadata.resource_version.is_some());

    let err = client.create_hardware_profile(&hardware("ns", "a")).await.unwrap_err();
    assert!(err.is_already_exists());
}

#[tokio::test]
async fn test_get_missing_is_not_found() {
    let client = MockProfileClient::new();
    let err = client.get_hardware_profile("ns", "missing").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_stale_update_conflicts() {
    let client = MockProfileClient::new();
    client.add_hardware_profile(hardware("ns", "a"));
    let first = client.get_hardware_profile("ns", "a").await.unwrap();
    let stale = first.clone();

    client.update_hardware_profile(&first).await.unwrap();
    let err = client.update_hardware_profile(&stale).await.unwrap_err();
    assert!(err.is_conflict());
}

#[tokio::test]
async fn test_update_of_vanished_object_is_not_found() {
    let client = MockProfileClient::new();
    let err = client.update_dashboard_profile(&dashboard("ns", "gone")).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_injected_failure_fires_once() {
    let client = MockProfileClient::new();
    client.fail_next(MockOperation::ListDashboard, ProfileClientError::Api("boom".to_string()));

    assert!(client.list_dashboard_profiles(&ListSelector::all()).await.is_err());
    assert!(client.list_dashboard_profiles(&ListSelector::all()).await.is_ok());
}

#[tokio::test]
async fn test_hook_runs_before_operation() {
    let client = MockProfileClient::new();
    client.before_next(MockOperation::CreateHardware, |store| {
        store.add_hardware_profile(hardware("ns", "raced"));
    });

    let err = client.create_hardware_profile(&hardware("ns", "raced")).await.unwrap_err();
    assert!(err.is_already_exists());
    assert_eq!(client.hardware_profiles().len(), 1);
}
