//! Namespaced CRUD over Kubernetes resources.
//!
//! One generic [`KubeResourceClient`] serves every namespaced resource kind,
//! so each kind gets the same get/create/update/delete behavior without a
//! hand-written client.

use std::fmt::Debug;

use async_trait::async_trait;
use k8s_openapi::NamespaceResourceScope;
use kube::api::{Api, DeleteParams, PostParams};
use kube::{Client, Resource, ResourceExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::crd::Cryostat;
use crate::error::{OperatorError, Result};

/// Get, create, update and delete resources of one kind in one namespace.
#[async_trait]
pub trait NamespacedApi<K>: Send + Sync {
    /// Fetch a resource by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource does not exist or the API call fails.
    async fn get(&self, name: &str) -> Result<K>;

    /// Create a resource and return the stored object.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource already exists or the API call fails.
    async fn create(&self, resource: &K) -> Result<K>;

    /// Replace a resource and return the stored object.
    ///
    /// # Errors
    ///
    /// Returns `OperatorError::MissingName` if the resource has no name, or an
    /// error if the API call fails.
    async fn update(&self, resource: &K) -> Result<K>;

    /// Delete a resource by name with the given propagation policy, grace
    /// period and preconditions.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource does not exist, a precondition does
    /// not hold, or the API call fails.
    async fn delete(&self, name: &str, params: &DeleteParams) -> Result<()>;
}

/// [`NamespacedApi`] backed by `kube::Api`.
pub struct KubeResourceClient<K> {
    api: Api<K>,
    namespace: String,
}

impl<K> KubeResourceClient<K>
where
    K: Resource<Scope = NamespaceResourceScope>,
    <K as Resource>::DynamicType: Default,
{
    /// Create a client for resources of kind `K` in `namespace`.
    #[must_use]
    pub fn new(client: Client, namespace: &str) -> Self {
        Self {
            api: Api::namespaced(client, namespace),
            namespace: namespace.to_string(),
        }
    }

    /// The namespace this client operates in.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn kind() -> String {
        K::kind(&K::DynamicType::default()).into_owned()
    }
}

impl<K: Clone> Clone for KubeResourceClient<K> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            namespace: self.namespace.clone(),
        }
    }
}

impl<K> Debug for KubeResourceClient<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeResourceClient")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<K> NamespacedApi<K> for KubeResourceClient<K>
where
    K: Resource<Scope = NamespaceResourceScope>
        + Clone
        + DeserializeOwned
        + Serialize
        + Debug
        + Send
        + Sync
        + 'static,
    <K as Resource>::DynamicType: Default,
{
    async fn get(&self, name: &str) -> Result<K> {
        let resource = self.api.get(name).await?;
        debug!(kind = %Self::kind(), namespace = %self.namespace, name, "Fetched resource");
        Ok(resource)
    }

    async fn create(&self, resource: &K) -> Result<K> {
        let created = self.api.create(&PostParams::default(), resource).await?;
        info!(
            kind = %Self::kind(),
            namespace = %self.namespace,
            name = %created.name_any(),
            "Created resource"
        );
        Ok(created)
    }

    async fn update(&self, resource: &K) -> Result<K> {
        let Some(name) = resource.meta().name.as_deref() else {
            return Err(OperatorError::MissingName(Self::kind()));
        };
        let updated = self
            .api
            .replace(name, &PostParams::default(), resource)
            .await?;
        info!(kind = %Self::kind(), namespace = %self.namespace, name, "Updated resource");
        Ok(updated)
    }

    async fn delete(&self, name: &str, params: &DeleteParams) -> Result<()> {
        let response = self.api.delete(name, params).await?;
        info!(
            kind = %Self::kind(),
            namespace = %self.namespace,
            name,
            pending_finalizers = response.is_left(),
            "Deleted resource"
        );
        Ok(())
    }
}

/// Entry point for operator resource clients.
#[derive(Clone)]
pub struct OperatorClient {
    client: Client,
}

impl OperatorClient {
    /// Create a client from the ambient kubeconfig or in-cluster config.
    ///
    /// # Errors
    ///
    /// Returns `OperatorError::Config` if no Kubernetes configuration can be
    /// inferred.
    pub async fn try_default() -> Result<Self> {
        let client = Client::try_default()
            .await
            .map_err(|e| OperatorError::Config(e.to_string()))?;
        Ok(Self::new(client))
    }

    /// Create a client over an existing Kubernetes client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Client for `Cryostat` resources in `namespace`.
    #[must_use]
    pub fn cryostats(&self, namespace: &str) -> KubeResourceClient<Cryostat> {
        KubeResourceClient::new(self.client.clone(), namespace)
    }

    /// Client for any namespaced resource kind in `namespace`.
    #[must_use]
    pub fn resources<K>(&self, namespace: &str) -> KubeResourceClient<K>
    where
        K: Resource<Scope = NamespaceResourceScope>,
        <K as Resource>::DynamicType: Default,
    {
        KubeResourceClient::new(self.client.clone(), namespace)
    }
}

impl Debug for OperatorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorClient")
            .field("default_namespace", &self.client.default_namespace())
            .finish()
    }
}
