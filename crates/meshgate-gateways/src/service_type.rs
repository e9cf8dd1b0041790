//! Per-role export mode lookup

use meshgate_common::crd::{ServiceMeshSpec, ServiceType};

use crate::config::resolve_config;
use crate::role::GatewayRole;

/// Service type declared for `role`
///
/// `None` means the mode was left unset (or the role is unsupported), which
/// the API server treats as ClusterIP.
pub fn resolve_service_type(mesh: &ServiceMeshSpec, role: &GatewayRole) -> Option<ServiceType> {
    resolve_config(mesh, role).service_type
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshgate_common::crd::{GatewayConfig, GatewaysSpec};

    fn mesh(ingress: Option<ServiceType>, egress: Option<ServiceType>) -> ServiceMeshSpec {
        ServiceMeshSpec {
            mesh_expansion: Some(true),
            gateways: GatewaysSpec {
                ingress: GatewayConfig {
                    service_type: ingress,
                    ..Default::default()
                },
                egress: GatewayConfig {
                    service_type: egress,
                    ..Default::default()
                },
            },
        }
    }

    #[test]
    fn each_role_reads_its_own_type() {
        let mesh = mesh(Some(ServiceType::LoadBalancer), Some(ServiceType::NodePort));
        assert_eq!(
            resolve_service_type(&mesh, &GatewayRole::Ingress),
            Some(ServiceType::LoadBalancer)
        );
        assert_eq!(
            resolve_service_type(&mesh, &GatewayRole::Egress),
            Some(ServiceType::NodePort)
        );
    }

    #[test]
    fn unset_type_stays_unset() {
        let mesh = mesh(None, None);
        assert_eq!(resolve_service_type(&mesh, &GatewayRole::Ingress), None);
    }

    #[test]
    fn story_unsupported_role_has_default_export_mode() {
        let mesh = mesh(Some(ServiceType::LoadBalancer), Some(ServiceType::LoadBalancer));
        assert_eq!(
            resolve_service_type(&mesh, &GatewayRole::from("unknown")),
            None
        );
    }
}
