//! Per-role gateway configuration lookup

use meshgate_common::crd::{GatewayConfig, ServiceMeshSpec};

use crate::role::GatewayRole;

static EMPTY_CONFIG: GatewayConfig = GatewayConfig::EMPTY;

/// Select the configuration block for `role`
///
/// Unsupported roles get the zero-value configuration (no labels, no
/// annotations, no service type) instead of an error.
pub fn resolve_config<'a>(mesh: &'a ServiceMeshSpec, role: &GatewayRole) -> &'a GatewayConfig {
    match role {
        GatewayRole::Ingress => &mesh.gateways.ingress,
        GatewayRole::Egress => &mesh.gateways.egress,
        GatewayRole::Unsupported(_) => &EMPTY_CONFIG,
    }
}
