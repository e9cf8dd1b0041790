//! Error types for meshgate
//!
//! Gateway synthesis itself is total and never fails. These errors exist for
//! the checked entry points and the surfaces around the core (CLI rendering,
//! manifest parsing).

use thiserror::Error;

/// Main error type for meshgate operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A gateway role outside the known set was requested through a checked API
    #[error("unsupported gateway role: {role}")]
    UnsupportedRole {
        /// The role as it was supplied by the caller
        role: String,
    },

    /// Validation error for a ServiceMesh spec
    #[error("validation error: {message}")]
    Validation {
        /// Description of what's invalid
        message: String,
        /// The invalid field path (e.g., "spec.gateways.ingress.serviceType")
        field: Option<String>,
    },

    /// Serialization/deserialization error
    #[error("serialization error: {message}")]
    Serialization {
        /// Description of what failed
        message: String,
        /// The resource kind being serialized (if known)
        kind: Option<String>,
    },
}

impl Error {
    /// Create an unsupported role error
    pub fn unsupported_role(role: impl Into<String>) -> Self {
        Self::UnsupportedRole { role: role.into() }
    }

    /// Create a validation error pointing at a specific field
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Create a serialization error for a specific resource kind
    pub fn serialization_for(msg: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::Serialization {
            message: msg.into(),
            kind: Some(kind.into()),
        }
    }
}
