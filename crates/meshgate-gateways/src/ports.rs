//! Port catalogs for gateway Services
//!
//! Each role exposes a fixed, ordered catalog of ports. The tables below are
//! the single source of truth for names, numbers and node ports; the order in
//! each table is the order of `spec.ports` on the rendered Service.
//!
//! Ingress node ports occupy the 31380-31500 block so NodePort installs get
//! stable, documented addresses. Egress is never reached from outside the
//! cluster and carries no node ports.

use crate::role::GatewayRole;

/// Transport protocol of a Service port
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// TCP
    #[default]
    Tcp,
    /// UDP
    Udp,
}

impl Protocol {
    /// Kubernetes wire spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tcp => "TCP",
            Self::Udp => "UDP",
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One exposed port of a gateway Service
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortBinding {
    /// Port name, unique within a Service
    pub name: String,
    /// Service port
    pub port: u16,
    /// Container port on the gateway pod
    pub target_port: u16,
    /// Transport protocol
    pub protocol: Protocol,
    /// Fixed node port, only honored by NodePort and LoadBalancer Services
    pub external_port: Option<u16>,
}

/// Static catalog entry; `port` doubles as the target port
struct CatalogPort {
    name: &'static str,
    port: u16,
    node_port: Option<u16>,
}

const fn tcp(name: &'static str, port: u16, node_port: u16) -> CatalogPort {
    CatalogPort {
        name,
        port,
        node_port: Some(node_port),
    }
}

const fn tcp_internal(name: &'static str, port: u16) -> CatalogPort {
    CatalogPort {
        name,
        port,
        node_port: None,
    }
}

impl CatalogPort {
    fn binding(&self) -> PortBinding {
        PortBinding {
            name: self.name.to_string(),
            port: self.port,
            target_port: self.port,
            protocol: Protocol::Tcp,
            external_port: self.node_port,
        }
    }
}

/// Ingress ports present on every install
const INGRESS_BASE: [CatalogPort; 9] = [
    tcp("status-port", 15020, 31460),
    tcp("http2", 80, 31380),
    tcp("https", 443, 31390),
    tcp("tcp", 31400, 31400),
    tcp("https-kiali", 15029, 31410),
    tcp("https-prom", 15030, 31420),
    tcp("https-grafana", 15031, 31430),
    tcp("https-tracing", 15032, 31440),
    tcp("tls", 15443, 31450),
];

/// Control plane ports appended to ingress when mesh expansion is on
const INGRESS_MESH_EXPANSION: [CatalogPort; 4] = [
    tcp("tcp-pilot-grpc-tls", 15011, 31470),
    tcp("tcp-mixer-grpc-tls", 15004, 31480),
    tcp("tcp-citadel-grpc-tls", 8060, 31490),
    tcp("tcp-dns-tls", 853, 31500),
];

const EGRESS: [CatalogPort; 3] = [
    tcp_internal("http2", 80),
    tcp_internal("https", 443),
    tcp_internal("tls", 15443),
];

/// Ordered port set for `role`
///
/// Ingress is the base catalog followed by the mesh expansion catalog when
/// `mesh_expansion` is set. Egress ignores the flag. Unsupported roles get no
/// ports.
pub fn build_ports(role: &GatewayRole, mesh_expansion: bool) -> Vec<PortBinding> {
    let catalog: &[CatalogPort] = match role {
        GatewayRole::Ingress => &INGRESS_BASE,
        GatewayRole::Egress => &EGRESS,
        GatewayRole::Unsupported(_) => &[],
    };
    let extension: &[CatalogPort] = match role {
        GatewayRole::Ingress if mesh_expansion => &INGRESS_MESH_EXPANSION,
        GatewayRole::Ingress | GatewayRole::Egress | GatewayRole::Unsupported(_) => &[],
    };

    catalog
        .iter()
        .chain(extension)
        .map(CatalogPort::binding)
        .collect()
}
