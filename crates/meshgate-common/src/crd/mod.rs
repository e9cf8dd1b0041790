//! Custom Resource Definitions for meshgate
//!
//! The ServiceMesh resource is the single input to gateway Service synthesis.

mod mesh;
mod types;

pub use mesh::{ServiceMesh, ServiceMeshSpec, ServiceMeshStatus};
pub use types::{GatewayConfig, GatewaysSpec, ServiceType};
