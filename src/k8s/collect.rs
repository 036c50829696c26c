use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, StatefulSet};
use tracing::{debug, info, trace, Level};

use crate::error::Result;
use crate::items::ControllerItem;
use crate::k8s::workloads::{controller_item, WorkloadController};

/// The cluster calls a report run needs. Implemented for `kube::Client`;
/// tests substitute an in-memory cluster.
#[allow(async_fn_in_trait)] // awaited on the current task only, never spawned
pub trait ClusterSource {
    /// Names of every namespace in the cluster, in listing order.
    async fn list_namespaces(&self) -> Result<Vec<String>>;

    /// Every controller of kind `K` in `namespace`, in listing order.
    async fn list_controllers<K: WorkloadController>(&self, namespace: &str) -> Result<Vec<K>>;
}

// ─── Generic collector ───────────────────────────────────────────────────────

/// List controllers of kind `K` in each namespace and flatten them.
/// The first failed list call is returned and everything collected so far is dropped.
pub async fn collect<K, S>(source: &S, namespaces: &[String]) -> Result<Vec<ControllerItem>>
where
    K: WorkloadController,
    S: ClusterSource,
{
    let mut items = Vec::new();
    for namespace in namespaces {
        let controllers = source.list_controllers::<K>(namespace).await?;
        debug!(
            namespace = %namespace,
            kind = %K::CONTROLLER_KIND,
            count = controllers.len(),
            "listed controllers"
        );
        for controller in &controllers {
            if tracing::enabled!(Level::TRACE) {
                if let Ok(json) = serde_json::to_string(controller) {
                    trace!(kind = %K::CONTROLLER_KIND, "{json}");
                }
            }
            items.push(controller_item(controller));
        }
    }
    Ok(items)
}

// ─── Driver ──────────────────────────────────────────────────────────────────

/// Use `explicit` verbatim when given, otherwise every namespace in the cluster.
pub async fn resolve_namespaces<S: ClusterSource>(
    source: &S,
    explicit: &[String],
) -> Result<Vec<String>> {
    if explicit.is_empty() {
        source.list_namespaces().await
    } else {
        Ok(explicit.to_vec())
    }
}

/// Collect Deployments, then StatefulSets, then DaemonSets.
pub async fn collect_all<S: ClusterSource>(
    source: &S,
    namespaces: &[String],
) -> Result<Vec<ControllerItem>> {
    let mut items = collect::<Deployment, _>(source, namespaces).await?;
    items.extend(collect::<StatefulSet, _>(source, namespaces).await?);
    items.extend(collect::<DaemonSet, _>(source, namespaces).await?);
    Ok(items)
}

/// Resolve the namespaces and collect every controller in them.
pub async fn run<S: ClusterSource>(source: &S, explicit: &[String]) -> Result<Vec<ControllerItem>> {
    let namespaces = resolve_namespaces(source, explicit).await?;
    info!(?namespaces, "requested namespaces");
    let items = collect_all(source, &namespaces).await?;
    info!(count = items.len(), "collected controllers");
    Ok(items)
}
