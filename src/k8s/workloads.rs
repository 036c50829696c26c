use std::collections::BTreeMap;
use std::fmt::Debug;

use k8s_openapi::{
    api::{
        apps::v1::{DaemonSet, Deployment, StatefulSet},
        core::v1::{Container, PodSpec, Volume},
    },
    apimachinery::pkg::api::resource::Quantity,
    NamespaceResourceScope,
};
use kube::{Resource, ResourceExt};
use serde::{de::DeserializeOwned, Serialize};

use crate::items::{ContainerItem, ControllerItem, ControllerKind};
use crate::k8s::units::{self, millicores, to_mebibytes};

// ─── Controller kinds ────────────────────────────────────────────────────────

/// A namespaced workload object that owns a pod template.
/// Kinds differ only in their label and in where the replica count comes from.
pub trait WorkloadController:
    Resource<DynamicType = (), Scope = NamespaceResourceScope>
    + DeserializeOwned
    + Serialize
    + Clone
    + Debug
    + Send
    + Sync
    + 'static
{
    const CONTROLLER_KIND: ControllerKind;

    fn replicas(&self) -> i32;

    fn pod_spec(&self) -> Option<&PodSpec>;
}

impl WorkloadController for Deployment {
    const CONTROLLER_KIND: ControllerKind = ControllerKind::Deployment;

    // The API server defaults an omitted replica count to 1.
    fn replicas(&self) -> i32 {
        self.spec.as_ref().and_then(|s| s.replicas).unwrap_or(1)
    }

    fn pod_spec(&self) -> Option<&PodSpec> {
        self.spec.as_ref()?.template.spec.as_ref()
    }
}

impl WorkloadController for StatefulSet {
    const CONTROLLER_KIND: ControllerKind = ControllerKind::StatefulSet;

    fn replicas(&self) -> i32 {
        self.spec.as_ref().and_then(|s| s.replicas).unwrap_or(1)
    }

    fn pod_spec(&self) -> Option<&PodSpec> {
        self.spec.as_ref()?.template.spec.as_ref()
    }
}

impl WorkloadController for DaemonSet {
    const CONTROLLER_KIND: ControllerKind = ControllerKind::DaemonSet;

    /// One pod per node; counted once.
    fn replicas(&self) -> i32 {
        1
    }

    fn pod_spec(&self) -> Option<&PodSpec> {
        self.spec.as_ref()?.template.spec.as_ref()
    }
}

// ─── Volumes ─────────────────────────────────────────────────────────────────

/// Storage declared by a pod template's volumes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VolumeSummary {
    /// Disk-backed emptyDir size limits, MiB.
    pub empty_dir: i64,
    /// Inline CSI volume sizes, MiB.
    pub storage: i64,
    /// Some disk emptyDir or CSI volume declares no size.
    pub size_unknown: bool,
    /// Some emptyDir lives in memory. Informational only, never summed.
    pub memory_backed: bool,
}

impl VolumeSummary {
    pub fn from_volumes(volumes: &[Volume]) -> Self {
        let mut summary = Self::default();
        let (mut empty_dir_bytes, mut storage_bytes) = (0i64, 0i64);

        for volume in volumes {
            if let Some(empty_dir) = &volume.empty_dir {
                if empty_dir.medium.as_deref().is_some_and(|m| !m.is_empty()) {
                    summary.memory_backed = true;
                } else {
                    match units::bytes(empty_dir.size_limit.as_ref()) {
                        size if size > 0 => empty_dir_bytes = empty_dir_bytes.saturating_add(size),
                        _ => summary.size_unknown = true,
                    }
                }
            }
            if let Some(size) = csi_size(volume) {
                if size > 0 {
                    storage_bytes = storage_bytes.saturating_add(size);
                } else {
                    summary.size_unknown = true;
                }
            }
        }

        summary.empty_dir = to_mebibytes(empty_dir_bytes);
        summary.storage = to_mebibytes(storage_bytes);
        summary
    }
}

/// Declared size in bytes of an inline CSI volume, from its `size` attribute.
/// `None` for every other source.
fn csi_size(volume: &Volume) -> Option<i64> {
    let csi = volume.csi.as_ref()?;
    let size = csi
        .volume_attributes
        .as_ref()
        .and_then(|attrs| attrs.get("size"))
        .map(|s| Quantity(s.clone()));
    Some(units::bytes(size.as_ref()))
}

// ─── Containers ──────────────────────────────────────────────────────────────

fn resource<'a>(map: Option<&'a BTreeMap<String, Quantity>>, name: &str) -> Option<&'a Quantity> {
    map.and_then(|m| m.get(name))
}

/// Flatten one container spec. Unset requests and limits are zero.
pub fn container_item(container: &Container) -> ContainerItem {
    let requests = container.resources.as_ref().and_then(|r| r.requests.as_ref());
    let limits = container.resources.as_ref().and_then(|r| r.limits.as_ref());
    ContainerItem {
        name: container.name.clone(),
        request_cpu: millicores(resource(requests, "cpu")),
        request_mem: units::mebibytes(resource(requests, "memory")),
        request_ephemeral_storage: units::mebibytes(resource(requests, "ephemeral-storage")),
        limit_cpu: millicores(resource(limits, "cpu")),
        limit_mem: units::mebibytes(resource(limits, "memory")),
        limit_ephemeral_storage: units::mebibytes(resource(limits, "ephemeral-storage")),
    }
}

pub fn container_items(containers: &[Container]) -> Vec<ContainerItem> {
    containers.iter().map(container_item).collect()
}

// ─── Controllers ─────────────────────────────────────────────────────────────

/// Build the flat record for one controller object.
pub fn controller_item<K: WorkloadController>(controller: &K) -> ControllerItem {
    let spec = controller.pod_spec();
    let volumes =
        VolumeSummary::from_volumes(spec.and_then(|s| s.volumes.as_deref()).unwrap_or_default());

    let item = ControllerItem {
        namespace: controller.namespace().unwrap_or_default(),
        controller_type: K::CONTROLLER_KIND,
        controller: controller.name_any(),
        replicas: controller.replicas(),
        init_container: container_items(
            spec.and_then(|s| s.init_containers.as_deref())
                .unwrap_or_default(),
        ),
        container: container_items(spec.map(|s| s.containers.as_slice()).unwrap_or_default()),
        empty_dir: volumes.empty_dir,
        storage: volumes.storage,
        storage_no_size: volumes.size_unknown,
    };

    if volumes.memory_backed {
        tracing::info!(
            namespace = %item.namespace,
            kind = %item.controller_type,
            controller = %item.controller,
            "memory emptyDir not counted in emptyDir total"
        );
    }
    item
}
