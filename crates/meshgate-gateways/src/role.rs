//! Gateway roles and naming conventions
//!
//! A role is the functional identity of an edge proxy. Roles arrive as
//! strings from configuration and CLI input; parsing never fails so that an
//! unexpected value degrades to an empty result instead of aborting
//! reconciliation of the other roles.

use std::collections::BTreeMap;

/// Functional identity of a mesh edge gateway
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GatewayRole {
    /// Accepts external traffic into the mesh
    Ingress,
    /// Routes mesh traffic out to external destinations
    Egress,
    /// Any other value, kept verbatim for diagnostics
    Unsupported(String),
}

impl GatewayRole {
    /// The roles meshgate knows how to render, in reconciliation order
    pub const KNOWN: [GatewayRole; 2] = [GatewayRole::Ingress, GatewayRole::Egress];

    /// Short role name (`ingress`, `egress`, or the unsupported input)
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ingress => "ingress",
            Self::Egress => "egress",
            Self::Unsupported(raw) => raw,
        }
    }

    /// Returns true for roles with a port catalog and configuration
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }

    /// Component name of the gateway workload (`ingressgateway`, `egressgateway`)
    ///
    /// Empty for unsupported roles.
    pub fn component(&self) -> &'static str {
        match self {
            Self::Ingress => "ingressgateway",
            Self::Egress => "egressgateway",
            Self::Unsupported(_) => "",
        }
    }
}

impl From<&str> for GatewayRole {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "ingress" | "ingressgateway" => Self::Ingress,
            "egress" | "egressgateway" => Self::Egress,
            _ => Self::Unsupported(s.to_string()),
        }
    }
}

impl std::str::FromStr for GatewayRole {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl std::fmt::Display for GatewayRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label key carrying the gateway component on gateway pods
pub const APP_LABEL: &str = "app";

/// Label key Istio uses to select gateway pods
pub const ISTIO_LABEL: &str = "istio";

/// Naming convention for gateway resources
///
/// The canonical name and the canonical selector are owned by the gateway
/// deployment conventions; the Service only has to agree with them.
pub trait GatewayNaming: Send + Sync {
    /// Resource name of the gateway Service
    fn service_name(&self, role: &GatewayRole) -> String;

    /// Labels that identify the gateway's pods
    fn selector(&self, role: &GatewayRole) -> BTreeMap<String, String>;
}

/// Istio naming: `<prefix>-<role>gateway`, selecting pods labeled
/// `app: istio-<role>gateway` and `istio: <role>gateway`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IstioNaming {
    /// Resource name prefix (usually the mesh name, `istio` by default)
    pub prefix: String,
}

impl IstioNaming {
    /// Create a naming convention with the given resource prefix
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for IstioNaming {
    fn default() -> Self {
        Self::new("istio")
    }
}

impl GatewayNaming for IstioNaming {
    fn service_name(&self, role: &GatewayRole) -> String {
        match role.component() {
            "" => String::new(),
            component => format!("{}-{}", self.prefix, component),
        }
    }

    fn selector(&self, role: &GatewayRole) -> BTreeMap<String, String> {
        match role.component() {
            "" => BTreeMap::new(),
            component => BTreeMap::from([
                (APP_LABEL.to_string(), format!("istio-{component}")),
                (ISTIO_LABEL.to_string(), component.to_string()),
            ]),
        }
    }
}
