//! Supporting types for the ServiceMesh CRD

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How a gateway Service exposes its ports
///
/// Serialized with the exact Kubernetes `spec.type` spellings.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq, Hash)]
pub enum ServiceType {
    /// Reachable only inside the cluster
    #[serde(rename = "ClusterIP")]
    ClusterIp,
    /// Reachable on a fixed port of every node
    NodePort,
    /// Reachable through a cloud load balancer (allocates node ports as well)
    LoadBalancer,
    /// DNS alias to an external name
    ExternalName,
}

impl ServiceType {
    /// Kubernetes wire spelling of this type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClusterIp => "ClusterIP",
            Self::NodePort => "NodePort",
            Self::LoadBalancer => "LoadBalancer",
            Self::ExternalName => "ExternalName",
        }
    }

    /// Returns true if Services of this type reserve a port on every node
    pub fn exposes_node_ports(&self) -> bool {
        matches!(self, Self::NodePort | Self::LoadBalancer)
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-role gateway configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfig {
    /// Whether the gateway is deployed at all (defaults to true)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Service type used to export the gateway
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<ServiceType>,

    /// Extra labels for the gateway Service
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub service_labels: BTreeMap<String, String>,

    /// Annotations for the gateway Service (e.g. cloud load balancer settings)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub service_annotations: BTreeMap<String, String>,
}

impl GatewayConfig {
    /// Zero-value configuration: no labels, no annotations, no service type
    pub const EMPTY: GatewayConfig = GatewayConfig {
        enabled: None,
        service_type: None,
        service_labels: BTreeMap::new(),
        service_annotations: BTreeMap::new(),
    };

    /// Returns true unless the gateway is explicitly disabled
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

/// Gateway configuration for both edge roles
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GatewaysSpec {
    /// Ingress gateway (traffic entering the mesh)
    #[serde(default)]
    pub ingress: GatewayConfig,

    /// Egress gateway (traffic leaving the mesh)
    #[serde(default)]
    pub egress: GatewayConfig,
}
