//! Kubernetes-backed hardware profile client

use crate::error::ProfileClientError;
use crate::profile_trait::ProfileClientTrait;
use crate::selector::ListSelector;
use crds::{DashboardHardwareProfile, HardwareProfile};
use kube::api::{ListParams, PostParams};
use kube::{Api, Client, Resource, ResourceExt};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use tracing::debug;

/// Which write a status code came back from; 409 means different things
/// for create and replace.
#[derive(Debug, Clone, Copy)]
enum WriteKind {
    Create,
    Replace,
}

/// Hardware profile client talking to the Kubernetes API server
#[derive(Clone)]
pub struct KubeProfileClient {
    client: Client,
}

impl KubeProfileClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn scoped<K>(&self, namespace: Option<&str>) -> Api<K>
    where
        K: Resource<Scope = k8s_openapi::NamespaceResourceScope, DynamicType = ()>,
    {
        match namespace {
            Some(ns) => Api::namespaced(self.client.clone(), ns),
            None => Api::all(self.client.clone()),
        }
    }

    async fn list<K>(&self, selector: &ListSelector) -> Result<Vec<K>, ProfileClientError>
    where
        K: Resource<Scope = k8s_openapi::NamespaceResourceScope, DynamicType = ()>
            + Clone
            + DeserializeOwned
            + Debug,
    {
        let api: Api<K> = self.scoped(selector.namespace.as_deref());
        let mut params = ListParams::default();
        if let Some(labels) = selector.label_selector.as_deref() {
            params = params.labels(labels);
        }
        let list = api.list(&params).await?;
        debug!(
            "Listed {} {} in {}",
            list.items.len(),
            K::kind(&()),
            selector.namespace.as_deref().unwrap_or("all namespaces")
        );
        Ok(list.items)
    }

    async fn write<K>(&self, object: &K, write: WriteKind) -> Result<K, ProfileClientError>
    where
        K: Resource<Scope = k8s_openapi::NamespaceResourceScope, DynamicType = ()>
            + Clone
            + Serialize
            + DeserializeOwned
            + Debug,
    {
        let name = object.name_any();
        let namespace = object.namespace().ok_or_else(|| {
            ProfileClientError::Api(format!("{} {} has no namespace", K::kind(&()), name))
        })?;
        let key = format!("{} {}/{}", K::kind(&()), namespace, name);
        let api: Api<K> = Api::namespaced(self.client.clone(), &namespace);
        let pp = PostParams::default();

        let result = match write {
            WriteKind::Create => api.create(&pp, object).await,
            WriteKind::Replace => api.replace(&name, &pp, object).await,
        };
        result.map_err(|e| classify(e, write, key))
    }
}

/// Maps API status codes onto the typed error variants.
fn classify(error: kube::Error, write: WriteKind, key: String) -> ProfileClientError {
    match error {
        kube::Error::Api(status) if status.code == 404 => ProfileClientError::NotFound(key),
        kube::Error::Api(status) if status.code == 409 => match write {
            WriteKind::Create => ProfileClientError::AlreadyExists(key),
            WriteKind::Replace => ProfileClientError::Conflict(key),
        },
        other => ProfileClientError::Kube(other),
    }
}

#[async_trait::async_trait]
impl ProfileClientTrait for KubeProfileClient {
    async fn list_dashboard_profiles(
        &self,
        selector: &ListSelector,
    ) -> Result<Vec<DashboardHardwareProfile>, ProfileClientError> {
        self.list(selector).await
    }

    async fn update_dashboard_profile(
        &self,
        profile: &DashboardHardwareProfile,
    ) -> Result<DashboardHardwareProfile, ProfileClientError> {
        self.write(profile, WriteKind::Replace).await
    }

    async fn get_hardware_profile(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<HardwareProfile, ProfileClientError> {
        let api: Api<HardwareProfile> = Api::namespaced(self.client.clone(), namespace);
        match api.get(name).await {
            Ok(profile) => Ok(profile),
            Err(kube::Error::Api(status)) if status.code == 404 => Err(ProfileClientError::NotFound(
                format!("HardwareProfile {namespace}/{name}"),
            )),
            Err(e) => Err(ProfileClientError::Kube(e)),
        }
    }

    async fn create_hardware_profile(
        &self,
        profile: &HardwareProfile,
    ) -> Result<HardwareProfile, ProfileClientError> {
        self.write(profile, WriteKind::Create).await
    }

    async fn update_hardware_profile(
        &self,
        profile: &HardwareProfile,
    ) -> Result<HardwareProfile, ProfileClientError> {
        self.write(profile, WriteKind::Replace).await
    }
}
