//! Common types for meshgate: the ServiceMesh CRD, errors, and metadata utilities

#![deny(missing_docs)]

pub mod crd;
pub mod error;
pub mod kube_utils;

pub use error::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// API group of the meshgate custom resources
pub const API_GROUP: &str = "mesh.meshgate.io";

/// API version of the meshgate custom resources
pub const API_VERSION: &str = "v1alpha1";
