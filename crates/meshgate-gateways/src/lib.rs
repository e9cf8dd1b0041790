//! Gateway Service synthesis for meshgate
//!
//! Derives the desired Kubernetes Service of an edge gateway (ingress or
//! egress) from a [`ServiceMesh`](meshgate_common::crd::ServiceMesh).
//! Everything here is a pure function of its inputs: no cluster calls, no
//! shared state, no retries. The apply engine that diffs the result against
//! the live cluster lives elsewhere.
//!
//! # Modules
//!
//! - [`role`] - Gateway roles and their naming conventions
//! - [`config`] - Per-role configuration lookup
//! - [`ports`] - Static port catalogs per role
//! - [`service_type`] - Per-role export mode lookup
//! - [`service`] - Descriptor assembly and conversion to a `v1/Service`

#![deny(missing_docs)]

pub mod config;
pub mod ports;
pub mod role;
pub mod service;
pub mod service_type;

pub use config::resolve_config;
pub use ports::{build_ports, PortBinding, Protocol};
pub use role::{GatewayNaming, GatewayRole, IstioNaming};
pub use service::{GatewayServiceAssembler, ServiceDescriptor};
pub use service_type::resolve_service_type;
