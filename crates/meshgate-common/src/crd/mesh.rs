//! ServiceMesh Custom Resource Definition
//!
//! A ServiceMesh declares the desired state of one mesh installation. Gateway
//! Services are derived from it on every reconciliation pass.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::types::GatewaysSpec;

/// Specification for a ServiceMesh
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "mesh.meshgate.io",
    version = "v1alpha1",
    kind = "ServiceMesh",
    plural = "servicemeshes",
    shortname = "smesh",
    status = "ServiceMeshStatus",
    namespaced,
    printcolumn = r#"{"name":"Mesh Expansion","type":"boolean","jsonPath":".spec.meshExpansion"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct ServiceMeshSpec {
    /// Expose control plane ports on the ingress gateway for workloads
    /// running outside the cluster
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh_expansion: Option<bool>,

    /// Edge gateway configuration
    #[serde(default)]
    pub gateways: GatewaysSpec,
}

impl ServiceMeshSpec {
    /// Returns true if mesh expansion is switched on (absent means off)
    pub fn mesh_expansion_enabled(&self) -> bool {
        self.mesh_expansion.unwrap_or(false)
    }
}

/// Status for a ServiceMesh
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceMeshStatus {
    /// Human-readable message about current state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ServiceMesh {
    /// Parse a ServiceMesh manifest from YAML
    ///
    /// The resource must carry a name so that owner references can be built
    /// for the Services derived from it.
    pub fn from_yaml(yaml: &str) -> crate::Result<Self> {
        let mesh: ServiceMesh = serde_yaml::from_str(yaml)
            .map_err(|e| crate::Error::serialization_for(e.to_string(), "ServiceMesh"))?;

        if mesh.metadata.name.as_deref().unwrap_or_default().is_empty() {
            return Err(crate::Error::validation_field(
                "ServiceMesh must have a name",
                "metadata.name",
            ));
        }

        Ok(mesh)
    }
}
