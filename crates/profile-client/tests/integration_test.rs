//! Integration tests for the Kubernetes-backed client
//!
//! These tests require a cluster with both hardware profile CRDs
//! installed (`cargo run -p crds --bin crdgen | kubectl apply -f -`)
//! and a kubeconfig pointing at it.

use crds::{HardwareProfile, HardwareProfileSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use profile_client::{KubeProfileClient, ListSelector, ProfileClientTrait};
use std::collections::BTreeMap;

async fn client() -> KubeProfileClient {
    let client = kube::Client::try_default()
        .await
        .expect("Failed to create Kubernetes client");
    KubeProfileClient::new(client)
}

#[tokio::test]
#[ignore] // Requires a running cluster
async fn test_list_dashboard_profiles() {
    let client = client().await;
    let profiles = client
        .list_dashboard_profiles(&ListSelector::all())
        .await
        .expect("Failed to list dashboard hardware profiles");
    println!("Found {} dashboard hardware profiles", profiles.len());
}

#[tokio::test]
#[ignore] // Requires a running cluster
async fn test_create_then_conflict() {
    let client = client().await;
    let namespace = std::env::var("TEST_NAMESPACE").unwrap_or_else(|_| "default".to_string());
    let profile = HardwareProfile {
        metadata: ObjectMeta {
            name: Some("profile-client-it".to_string()),
            namespace: Some(namespace.clone()),
            ..Default::default()
        },
        spec: HardwareProfileSpec::default(),
    };

    let created = match client.create_hardware_profile(&profile).await {
        Ok(p) => p,
        Err(e) if e.is_already_exists() => client
            .get_hardware_profile(&namespace, "profile-client-it")
            .await
            .expect("Failed to get existing profile"),
        Err(e) => panic!("Failed to create profile: {e}"),
    };

    let err = client.create_hardware_profile(&profile).await.unwrap_err();
    assert!(err.is_already_exists());

    // A no-op replace keeps the resourceVersion, so change something
    let mut touched = created.clone();
    touched.metadata.annotations = Some(BTreeMap::from([(
        "profile-client-it/touched".to_string(),
        created.metadata.resource_version.clone().unwrap_or_default(),
    )]));
    let updated = client
        .update_hardware_profile(&touched)
        .await
        .expect("Failed to update profile");
    let err = client.update_hardware_profile(&touched).await.unwrap_err();
    assert!(err.is_conflict(), "stale update should conflict: {err}");
    assert_ne!(updated.metadata.resource_version, created.metadata.resource_version);
}
