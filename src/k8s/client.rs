use std::path::Path;

use anyhow::{Context, Result};
use k8s_openapi::api::core::v1::Namespace;
use kube::{
    api::{Api, ListParams},
    config::{KubeConfigOptions, Kubeconfig},
    Client, ResourceExt,
};

use crate::error::ReportError;
use crate::k8s::collect::ClusterSource;
use crate::k8s::workloads::WorkloadController;

/// Build a kube::Client from an explicit kubeconfig file, or infer the config
/// ($KUBECONFIG, ~/.kube/config, then in-cluster) when no path is given.
pub async fn build_client(kubeconfig: Option<&Path>) -> Result<Client> {
    let config = match kubeconfig {
        Some(path) => {
            let file = Kubeconfig::read_from(path)
                .with_context(|| format!("Failed to read kubeconfig '{}'", path.display()))?;
            kube::Config::from_custom_kubeconfig(file, &KubeConfigOptions::default())
                .await
                .with_context(|| format!("Failed to load kubeconfig '{}'", path.display()))?
        }
        None => kube::Config::infer()
            .await
            .context("Failed to infer Kubernetes config")?,
    };

    Client::try_from(config).context("Failed to build Kubernetes client")
}

/// Return the current context name from kubeconfig (for the startup log line).
pub fn current_context(kubeconfig: Option<&Path>) -> String {
    kubeconfig
        .map_or_else(Kubeconfig::read, Kubeconfig::read_from)
        .ok()
        .and_then(|cfg| cfg.current_context)
        .unwrap_or_else(|| "unknown".to_string())
}

impl ClusterSource for Client {
    async fn list_namespaces(&self) -> crate::error::Result<Vec<String>> {
        let api: Api<Namespace> = Api::all(self.clone());
        let list = api
            .list(&ListParams::default())
            .await
            .map_err(|e| ReportError::Cluster {
                resource: "namespaces",
                namespace: None,
                source: Box::new(e),
            })?;
        Ok(list.items.iter().map(ResourceExt::name_any).collect())
    }

    async fn list_controllers<K: WorkloadController>(
        &self,
        namespace: &str,
    ) -> crate::error::Result<Vec<K>> {
        let api: Api<K> = Api::namespaced(self.clone(), namespace);
        let list = api
            .list(&ListParams::default())
            .await
            .map_err(|e| ReportError::Cluster {
                resource: K::CONTROLLER_KIND.plural(),
                namespace: Some(namespace.to_string()),
                source: Box::new(e),
            })?;
        Ok(list.items)
    }
}
