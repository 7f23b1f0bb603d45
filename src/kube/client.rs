//! Generic cluster client
//!
//! `ClusterClient` is the untyped create/delete capability the deployment
//! engine drives. `KubeClusterClient` implements it on top of kube-rs'
//! dynamic API, addressing collections through a `ResourceTypeDescriptor`
//! rather than compiled-in types.

use async_trait::async_trait;
use kube::ResourceExt;
use kube::api::{Api, DeleteParams, PostParams};
use kube::core::{ApiResource, DynamicObject};

use crate::deploy::{Resource, ResourceTypeDescriptor};

/// Failures reported by a cluster client
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("kubernetes API request failed")]
    Kube(#[from] kube::Error),

    #[error("failed to convert manifest into a dynamic object")]
    Encode(#[source] serde_json::Error),

    /// Failure raised by a client implementation that is not backed by kube-rs
    #[error("{0}")]
    Other(String),
}

/// Untyped create/delete against arbitrary namespaced collections
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// Create `resource` in `namespace`, returning the name of the created object
    async fn create(
        &self,
        descriptor: &ResourceTypeDescriptor,
        namespace: &str,
        resource: &Resource,
    ) -> Result<String, ClientError>;

    /// Delete the object called `name` from `namespace`
    async fn delete(
        &self,
        descriptor: &ResourceTypeDescriptor,
        namespace: &str,
        name: &str,
    ) -> Result<(), ClientError>;
}

/// `ClusterClient` backed by a kube-rs client
#[derive(Clone)]
pub struct KubeClusterClient {
    client: kube::Client,
}

impl KubeClusterClient {
    pub fn new(client: kube::Client) -> Self {
        Self { client }
    }

    /// Get the inner kube Client
    pub fn inner(&self) -> &kube::Client {
        &self.client
    }

    fn api(
        &self,
        descriptor: &ResourceTypeDescriptor,
        kind: &str,
        namespace: &str,
    ) -> Api<DynamicObject> {
        let api_resource = api_resource(descriptor, kind);
        Api::namespaced_with(self.client.clone(), namespace, &api_resource)
    }
}

/// Build the dynamic API descriptor for a collection
fn api_resource(descriptor: &ResourceTypeDescriptor, kind: &str) -> ApiResource {
    ApiResource {
        group: descriptor.group.clone(),
        version: descriptor.version.clone(),
        api_version: descriptor.api_version(),
        kind: kind.to_string(),
        plural: descriptor.resource.clone(),
    }
}

#[async_trait]
impl ClusterClient for KubeClusterClient {
    async fn create(
        &self,
        descriptor: &ResourceTypeDescriptor,
        namespace: &str,
        resource: &Resource,
    ) -> Result<String, ClientError> {
        let object: DynamicObject =
            serde_json::from_value(resource.as_value().clone()).map_err(ClientError::Encode)?;

        let api = self.api(descriptor, resource.kind().unwrap_or_default(), namespace);
        let created = api.create(&PostParams::default(), &object).await?;

        Ok(created.name_any())
    }

    async fn delete(
        &self,
        descriptor: &ResourceTypeDescriptor,
        namespace: &str,
        name: &str,
    ) -> Result<(), ClientError> {
        let api = self.api(descriptor, "", namespace);
        api.delete(name, &DeleteParams::default()).await?;
        Ok(())
    }
}
