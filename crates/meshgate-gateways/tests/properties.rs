//! Property tests for label precedence, port uniqueness and idempotence

use std::collections::{BTreeMap, HashSet};

use meshgate_common::crd::{GatewayConfig, GatewaysSpec, ServiceMesh, ServiceMeshSpec};
use meshgate_gateways::{build_ports, GatewayNaming, GatewayRole, GatewayServiceAssembler, IstioNaming};
use proptest::prelude::*;

fn label_map() -> impl Strategy<Value = BTreeMap<String, String>> {
    // Keys overlap with the selector keys on purpose
    prop::collection::btree_map(
        prop_oneof![Just("app".to_string()), Just("istio".to_string()), "[a-z]{1,8}"],
        "[a-z0-9-]{0,12}",
        0..6,
    )
}

fn role() -> impl Strategy<Value = GatewayRole> {
    prop_oneof![
        Just(GatewayRole::Ingress),
        Just(GatewayRole::Egress),
        "[a-z]{1,10}".prop_map(|s| GatewayRole::from(s.as_str())),
    ]
}

fn mesh(
    expansion: Option<bool>,
    ingress: BTreeMap<String, String>,
    egress: BTreeMap<String, String>,
) -> ServiceMesh {
    ServiceMesh::new(
        "mesh",
        ServiceMeshSpec {
            mesh_expansion: expansion,
            gateways: GatewaysSpec {
                ingress: GatewayConfig {
                    service_labels: ingress,
                    ..Default::default()
                },
                egress: GatewayConfig {
                    service_labels: egress,
                    ..Default::default()
                },
            },
        },
    )
}

proptest! {
    #[test]
    fn selector_labels_are_never_shadowed(
        ingress in label_map(),
        egress in label_map(),
        role in role(),
    ) {
        let mesh = mesh(None, ingress, egress);
        let svc = GatewayServiceAssembler::new().assemble(&mesh, &role);

        for (key, value) in &svc.selector {
            prop_assert_eq!(svc.labels().get(key), Some(value));
        }
        prop_assert_eq!(&svc.selector, &IstioNaming::default().selector(&role));
    }

    #[test]
    fn selector_matches_istio_pod_labels_for_any_prefix(prefix in "[a-z][a-z0-9-]{0,10}") {
        let naming = IstioNaming::new(prefix);
        for role in GatewayRole::KNOWN {
            let selector = naming.selector(&role);
            let component = role.component();
            prop_assert_eq!(selector.get("app"), Some(&format!("istio-{component}")));
            prop_assert_eq!(selector.get("istio").map(String::as_str), Some(component));
        }
    }

    #[test]
    fn configured_labels_survive_unless_they_collide(ingress in label_map()) {
        let mesh = mesh(None, ingress.clone(), BTreeMap::new());
        let svc = GatewayServiceAssembler::new().assemble(&mesh, &GatewayRole::Ingress);

        for (key, value) in &ingress {
            if !svc.selector.contains_key(key) {
                prop_assert_eq!(svc.labels().get(key), Some(value));
            }
        }
    }

    #[test]
    fn assembly_is_idempotent(
        expansion in proptest::option::of(any::<bool>()),
        ingress in label_map(),
        egress in label_map(),
        role in role(),
    ) {
        let mesh = mesh(expansion, ingress, egress);
        let assembler = GatewayServiceAssembler::new();
        prop_assert_eq!(assembler.assemble(&mesh, &role), assembler.assemble(&mesh, &role));
    }

    #[test]
    fn port_names_are_unique(role in role(), expansion in any::<bool>()) {
        let ports = build_ports(&role, expansion);
        let names: HashSet<_> = ports.iter().map(|p| p.name.as_str()).collect();
        prop_assert_eq!(names.len(), ports.len());
    }
}
