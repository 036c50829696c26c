use serde::{Deserialize, Serialize};
use std::fmt;

/// The workload controller kinds the report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControllerKind {
    Deployment,
    StatefulSet,
    DaemonSet,
}

impl ControllerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deployment => "Deployment",
            Self::StatefulSet => "StatefulSet",
            Self::DaemonSet => "DaemonSet",
        }
    }

    /// Plural resource name used in list errors and logs.
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Deployment => "deployments",
            Self::StatefulSet => "statefulsets",
            Self::DaemonSet => "daemonsets",
        }
    }
}

impl fmt::Display for ControllerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a container row comes from `initContainers` or `containers`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerType {
    InitContainer,
    Container,
}

impl ContainerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InitContainer => "initContainer",
            Self::Container => "container",
        }
    }
}

/// Requests and limits of one container. CPU in millicores, everything else in MiB.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerItem {
    pub name: String,
    #[serde(default)]
    pub request_cpu: i64,
    #[serde(default)]
    pub request_mem: i64,
    #[serde(default)]
    pub request_ephemeral_storage: i64,
    #[serde(default)]
    pub limit_cpu: i64,
    #[serde(default)]
    pub limit_mem: i64,
    #[serde(default)]
    pub limit_ephemeral_storage: i64,
}

/// One live controller object, flattened at scan time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerItem {
    pub namespace: String,
    pub controller_type: ControllerKind,
    pub controller: String,
    pub replicas: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub init_container: Vec<ContainerItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub container: Vec<ContainerItem>,
    /// Disk-backed emptyDir total, MiB.
    #[serde(default)]
    pub empty_dir: i64,
    /// Inline CSI volume total, MiB.
    #[serde(default)]
    pub storage: i64,
    #[serde(default, skip_serializing_if = "is_false")]
    pub storage_no_size: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde passes fields by reference
fn is_false(b: &bool) -> bool {
    !*b
}

impl ControllerItem {
    /// Number of container rows this controller occupies in tabular output.
    pub fn row_span(&self) -> usize {
        self.init_container.len() + self.container.len()
    }

    /// Init containers first, then regular containers, each tagged with its type.
    pub fn containers(&self) -> impl Iterator<Item = (ContainerType, &ContainerItem)> {
        self.init_container
            .iter()
            .map(|c| (ContainerType::InitContainer, c))
            .chain(self.container.iter().map(|c| (ContainerType::Container, c)))
    }
}
