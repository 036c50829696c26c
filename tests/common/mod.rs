//! Builders for k8s-openapi objects and an in-memory cluster shared by the test files.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

use k8s_openapi::{
    api::{
        apps::v1::{
            DaemonSet, DaemonSetSpec, Deployment, DeploymentSpec, StatefulSet, StatefulSetSpec,
        },
        core::v1::{
            CSIVolumeSource, Container, EmptyDirVolumeSource, EphemeralVolumeSource,
            HostPathVolumeSource, PersistentVolumeClaimSpec, PersistentVolumeClaimTemplate, PodSpec,
            PodTemplateSpec, ResourceRequirements, Volume, VolumeResourceRequirements,
        },
    },
    apimachinery::pkg::{api::resource::Quantity, apis::meta::v1::ObjectMeta},
};
use kube::Resource;
use kuberes::error::{ReportError, Result};
use kuberes::items::ControllerKind;
use kuberes::k8s::collect::ClusterSource;
use kuberes::k8s::workloads::WorkloadController;

// ── Containers ────────────────────────────────────────────────────────────────

fn quantities(pairs: &[(&str, &str)]) -> Option<BTreeMap<String, Quantity>> {
    if pairs.is_empty() {
        return None;
    }
    Some(
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), Quantity((*v).to_string())))
            .collect(),
    )
}

pub fn container(name: &str, requests: &[(&str, &str)], limits: &[(&str, &str)]) -> Container {
    let resources = if requests.is_empty() && limits.is_empty() {
        None
    } else {
        Some(ResourceRequirements {
            requests: quantities(requests),
            limits: quantities(limits),
            ..Default::default()
        })
    };
    Container {
        name: name.to_string(),
        resources,
        ..Default::default()
    }
}

pub fn bare(name: &str) -> Container {
    container(name, &[], &[])
}

// ── Volumes ───────────────────────────────────────────────────────────────────

pub fn empty_dir(name: &str, medium: Option<&str>, size: Option<&str>) -> Volume {
    Volume {
        name: name.to_string(),
        empty_dir: Some(EmptyDirVolumeSource {
            medium: medium.map(str::to_string),
            size_limit: size.map(|s| Quantity(s.to_string())),
        }),
        ..Default::default()
    }
}

pub fn csi(name: &str, size: Option<&str>) -> Volume {
    Volume {
        name: name.to_string(),
        csi: Some(CSIVolumeSource {
            driver: "ebs.csi.aws.com".to_string(),
            volume_attributes: size.map(|s| BTreeMap::from([("size".to_string(), s.to_string())])),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn ephemeral_claim(name: &str, size: Option<&str>) -> Volume {
    Volume {
        name: name.to_string(),
        ephemeral: Some(EphemeralVolumeSource {
            volume_claim_template: Some(PersistentVolumeClaimTemplate {
                metadata: None,
                spec: PersistentVolumeClaimSpec {
                    resources: size.map(|s| VolumeResourceRequirements {
                        requests: quantities(&[("storage", s)]),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
            }),
        }),
        ..Default::default()
    }
}

pub fn host_path(name: &str) -> Volume {
    Volume {
        name: name.to_string(),
        host_path: Some(HostPathVolumeSource {
            path: "/var/log".to_string(),
            ..Default::default()
        }),
        ..Default::default()
    }
}

// ── Controllers ───────────────────────────────────────────────────────────────

pub fn pod_spec(init: Vec<Container>, containers: Vec<Container>, volumes: Vec<Volume>) -> PodSpec {
    PodSpec {
        init_containers: (!init.is_empty()).then_some(init),
        containers,
        volumes: (!volumes.is_empty()).then_some(volumes),
        ..Default::default()
    }
}

fn meta(namespace: &str, name: &str) -> ObjectMeta {
    ObjectMeta {
        name: Some(name.to_string()),
        namespace: Some(namespace.to_string()),
        ..Default::default()
    }
}

fn template(spec: PodSpec) -> PodTemplateSpec {
    PodTemplateSpec {
        metadata: None,
        spec: Some(spec),
    }
}

pub fn deployment(namespace: &str, name: &str, replicas: Option<i32>, spec: PodSpec) -> Deployment {
    Deployment {
        metadata: meta(namespace, name),
        spec: Some(DeploymentSpec {
            replicas,
            template: template(spec),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn statefulset(
    namespace: &str,
    name: &str,
    replicas: Option<i32>,
    spec: PodSpec,
) -> StatefulSet {
    StatefulSet {
        metadata: meta(namespace, name),
        spec: Some(StatefulSetSpec {
            replicas,
            template: template(spec),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn daemonset(namespace: &str, name: &str, spec: PodSpec) -> DaemonSet {
    DaemonSet {
        metadata: meta(namespace, name),
        spec: Some(DaemonSetSpec {
            template: template(spec),
            ..Default::default()
        }),
        ..Default::default()
    }
}

// ── In-memory cluster ─────────────────────────────────────────────────────────

/// A cluster held in memory. Objects are stored as JSON so one map serves every kind.
#[derive(Default)]
pub struct FakeCluster {
    pub namespaces: Vec<String>,
    pub objects: HashMap<(ControllerKind, String), Vec<serde_json::Value>>,
    pub failing_kind: Option<ControllerKind>,
    pub failing_namespaces: bool,
    /// Every list call in order: "namespaces" or "<Kind>/<namespace>".
    pub calls: RefCell<Vec<String>>,
}

impl FakeCluster {
    pub fn with_namespaces(namespaces: &[&str]) -> Self {
        Self {
            namespaces: namespaces.iter().map(|s| (*s).to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn add<K: WorkloadController>(&mut self, controller: &K) {
        let namespace = controller.meta().namespace.clone().unwrap_or_default();
        self.objects
            .entry((K::CONTROLLER_KIND, namespace))
            .or_default()
            .push(serde_json::to_value(controller).unwrap());
    }

    fn refused(resource: &'static str, namespace: Option<&str>) -> ReportError {
        ReportError::Cluster {
            resource,
            namespace: namespace.map(str::to_string),
            source: Box::new(std::io::Error::other("connection refused")),
        }
    }
}

impl ClusterSource for FakeCluster {
    async fn list_namespaces(&self) -> Result<Vec<String>> {
        self.calls.borrow_mut().push("namespaces".to_string());
        if self.failing_namespaces {
            return Err(Self::refused("namespaces", None));
        }
        Ok(self.namespaces.clone())
    }

    async fn list_controllers<K: WorkloadController>(&self, namespace: &str) -> Result<Vec<K>> {
        self.calls
            .borrow_mut()
            .push(format!("{}/{namespace}", K::CONTROLLER_KIND));
        if self.failing_kind == Some(K::CONTROLLER_KIND) {
            return Err(Self::refused(K::CONTROLLER_KIND.plural(), Some(namespace)));
        }
        Ok(self
            .objects
            .get(&(K::CONTROLLER_KIND, namespace.to_string()))
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(|v| serde_json::from_value(v).unwrap())
            .collect())
    }
}
