//! Gateway Service assembly
//!
//! Composes configuration lookup, naming, the port catalogs and the export
//! mode into one immutable [`ServiceDescriptor`], then converts it into the
//! `v1/Service` object handed to the apply engine.

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{Service, ServicePort, ServiceSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use kube::ResourceExt;
use meshgate_common::crd::{ServiceMesh, ServiceType};
use meshgate_common::kube_utils::{merge_labels, MetadataBuilder, OwnedObjectMeta};
use meshgate_common::Error;
use tracing::{debug, warn};

use crate::config::resolve_config;
use crate::ports::{build_ports, PortBinding};
use crate::role::{GatewayNaming, GatewayRole, IstioNaming};
use crate::service_type::resolve_service_type;

static NO_LABELS: BTreeMap<String, String> = BTreeMap::new();

/// Desired state of a gateway Service
///
/// Built fresh on every reconciliation pass and never mutated afterwards.
/// Equality is structural, so two descriptors built from the same mesh
/// compare equal and the apply engine can skip the update.
#[derive(Clone, Debug, PartialEq)]
pub struct ServiceDescriptor {
    /// Name, namespace, merged labels, annotations and owner reference
    pub metadata: ObjectMeta,
    /// Service type; `None` leaves the API server default (ClusterIP)
    pub export_mode: Option<ServiceType>,
    /// Exposed ports in catalog order
    pub ports: Vec<PortBinding>,
    /// Labels selecting the gateway pods
    pub selector: BTreeMap<String, String>,
}

impl ServiceDescriptor {
    /// Service name (empty for unsupported roles)
    pub fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or_default()
    }

    /// Service labels: configured labels overlaid with the selector
    pub fn labels(&self) -> &BTreeMap<String, String> {
        self.metadata.labels.as_ref().unwrap_or(&NO_LABELS)
    }

    /// Service annotations
    pub fn annotations(&self) -> &BTreeMap<String, String> {
        self.metadata.annotations.as_ref().unwrap_or(&NO_LABELS)
    }

    /// Returns true if the descriptor exposes nothing (unsupported role)
    pub fn is_empty(&self) -> bool {
        self.ports.is_empty() && self.selector.is_empty()
    }
}

impl From<ServiceDescriptor> for Service {
    fn from(descriptor: ServiceDescriptor) -> Self {
        // Node ports are rejected by the API server on ClusterIP Services
        let node_ports = descriptor
            .export_mode
            .is_some_and(|mode| mode.exposes_node_ports());

        let ports = descriptor
            .ports
            .into_iter()
            .map(|p| ServicePort {
                name: Some(p.name),
                port: i32::from(p.port),
                target_port: Some(IntOrString::Int(i32::from(p.target_port))),
                protocol: Some(p.protocol.as_str().to_string()),
                node_port: p.external_port.filter(|_| node_ports).map(i32::from),
                ..Default::default()
            })
            .collect();

        Service {
            metadata: descriptor.metadata,
            spec: Some(ServiceSpec {
                type_: descriptor.export_mode.map(|mode| mode.as_str().to_string()),
                selector: Some(descriptor.selector),
                ports: Some(ports),
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}

/// Builds gateway Service descriptors from a ServiceMesh
///
/// Holds only the naming convention and the metadata builder; the mesh is
/// passed to every call, so one assembler can serve concurrent
/// reconciliations of different roles or meshes.
#[derive(Clone, Debug, Default)]
pub struct GatewayServiceAssembler<N = IstioNaming, M = OwnedObjectMeta> {
    naming: N,
    metadata: M,
}

impl GatewayServiceAssembler {
    /// Assembler with Istio naming and owner-referenced metadata
    pub fn new() -> Self {
        Self::default()
    }
}

impl<N: GatewayNaming, M: MetadataBuilder> GatewayServiceAssembler<N, M> {
    /// Assembler with a custom naming convention and metadata builder
    pub fn with(naming: N, metadata: M) -> Self {
        Self { naming, metadata }
    }

    /// Build the desired Service for `role`
    ///
    /// Total: an unsupported role yields a nameless descriptor with no ports,
    /// no selector and no export mode rather than an error.
    pub fn assemble(&self, mesh: &ServiceMesh, role: &GatewayRole) -> ServiceDescriptor {
        let spec = &mesh.spec;
        let config = resolve_config(spec, role);

        let selector = self.naming.selector(role);
        // Selector last: configured labels must never shadow pod identity
        let labels = merge_labels(&config.service_labels, &selector);
        let metadata = self.metadata.object_meta(
            mesh,
            &self.naming.service_name(role),
            labels,
            config.service_annotations.clone(),
        );

        let descriptor = ServiceDescriptor {
            metadata,
            export_mode: resolve_service_type(spec, role),
            ports: build_ports(role, spec.mesh_expansion_enabled()),
            selector,
        };

        if !role.is_supported() {
            warn!(
                mesh = %mesh.name_any(),
                role = %role,
                "unsupported gateway role, rendering an empty Service"
            );
        }
        debug!(
            mesh = %mesh.name_any(),
            role = %role,
            service = descriptor.name(),
            ports = descriptor.ports.len(),
            export_mode = ?descriptor.export_mode,
            "assembled gateway Service"
        );

        descriptor
    }

    /// Like [`assemble`](Self::assemble), but rejects unsupported roles
    pub fn assemble_checked(
        &self,
        mesh: &ServiceMesh,
        role: &GatewayRole,
    ) -> Result<ServiceDescriptor, Error> {
        if !role.is_supported() {
            return Err(Error::unsupported_role(role.as_str()));
        }
        Ok(self.assemble(mesh, role))
    }

    /// Descriptors for every known gateway that is enabled in the mesh
    pub fn desired_services(&self, mesh: &ServiceMesh) -> Vec<ServiceDescriptor> {
        GatewayRole::KNOWN
            .iter()
            .filter(|role| resolve_config(&mesh.spec, role).is_enabled())
            .map(|role| self.assemble(mesh, role))
            .collect()
    }
}
