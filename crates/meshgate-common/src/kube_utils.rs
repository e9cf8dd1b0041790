//! Metadata utilities shared by everything that renders Kubernetes objects
//!
//! These are the naming-agnostic building blocks: label merging with a
//! defined precedence, and construction of `ObjectMeta` that ties a rendered
//! object back to the ServiceMesh that owns it.

use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::{Resource, ResourceExt};

use crate::crd::ServiceMesh;

/// Merge two label sets; keys in `overlay` win on collision
pub fn merge_labels(
    base: &BTreeMap<String, String>,
    overlay: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut merged = base.clone();
    merged.extend(overlay.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

/// Builds the metadata of an object owned by a ServiceMesh
///
/// Implementations attach identity and ownership (namespace, owner
/// references) around the name, labels and annotations computed by the
/// caller. They must be deterministic: the same inputs always produce the
/// same metadata, so unchanged desired state diffs as a no-op.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait MetadataBuilder: Send + Sync {
    /// Build metadata for an object named `name` owned by `owner`
    fn object_meta(
        &self,
        owner: &ServiceMesh,
        name: &str,
        labels: BTreeMap<String, String>,
        annotations: BTreeMap<String, String>,
    ) -> ObjectMeta;
}

/// Default [`MetadataBuilder`]: places the object in the owner's namespace
/// and marks the owner as its controller.
#[derive(Clone, Copy, Debug, Default)]
pub struct OwnedObjectMeta;

impl MetadataBuilder for OwnedObjectMeta {
    fn object_meta(
        &self,
        owner: &ServiceMesh,
        name: &str,
        labels: BTreeMap<String, String>,
        annotations: BTreeMap<String, String>,
    ) -> ObjectMeta {
        ObjectMeta {
            name: (!name.is_empty()).then(|| name.to_string()),
            namespace: owner.namespace(),
            labels: (!labels.is_empty()).then_some(labels),
            annotations: (!annotations.is_empty()).then_some(annotations),
            // None until the owner has been persisted and carries a uid
            owner_references: owner.controller_owner_ref(&()).map(|r| vec![r]),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::ServiceMeshSpec;

    fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn persisted_mesh() -> ServiceMesh {
        let mut mesh = ServiceMesh::new("mesh", ServiceMeshSpec::default());
        mesh.metadata.namespace = Some("mesh-system".to_string());
        mesh.metadata.uid = Some("6a1c9e0e-uid".to_string());
        mesh
    }

    #[test]
    fn merge_is_a_union() {
        let merged = merge_labels(&labels(&[("a", "1")]), &labels(&[("b", "2")]));
        assert_eq!(merged, labels(&[("a", "1"), ("b", "2")]));
    }

    #[test]
    fn merge_overlay_wins_on_collision() {
        let merged = merge_labels(
            &labels(&[("app", "custom"), ("team", "edge")]),
            &labels(&[("app", "ingressgateway")]),
        );
        assert_eq!(merged.get("app"), Some(&"ingressgateway".to_string()));
        assert_eq!(merged.get("team"), Some(&"edge".to_string()));
    }

    #[test]
    fn merge_leaves_inputs_untouched() {
        let base = labels(&[("app", "custom")]);
        let overlay = labels(&[("app", "ingressgateway")]);
        let _ = merge_labels(&base, &overlay);
        assert_eq!(base, labels(&[("app", "custom")]));
    }

    #[test]
    fn story_owned_metadata_points_at_the_mesh() {
        let mesh = persisted_mesh();
        let meta = OwnedObjectMeta.object_meta(
            &mesh,
            "istio-ingressgateway",
            labels(&[("app", "ingressgateway")]),
            labels(&[("lb.example.com/internal", "true")]),
        );

        assert_eq!(meta.name.as_deref(), Some("istio-ingressgateway"));
        assert_eq!(meta.namespace.as_deref(), Some("mesh-system"));
        assert_eq!(meta.labels, Some(labels(&[("app", "ingressgateway")])));
        assert_eq!(
            meta.annotations,
            Some(labels(&[("lb.example.com/internal", "true")]))
        );

        let refs = meta.owner_references.expect("owner reference");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].kind, "ServiceMesh");
        assert_eq!(refs[0].name, "mesh");
        assert_eq!(refs[0].uid, "6a1c9e0e-uid");
        assert_eq!(refs[0].controller, Some(true));
    }

    #[test]
    fn story_unpersisted_mesh_yields_no_owner_reference() {
        let mesh = ServiceMesh::new("mesh", ServiceMeshSpec::default());
        let meta = OwnedObjectMeta.object_meta(&mesh, "gw", BTreeMap::new(), BTreeMap::new());
        assert!(meta.owner_references.is_none());
    }

    #[test]
    fn empty_fields_are_omitted() {
        let meta = OwnedObjectMeta.object_meta(
            &persisted_mesh(),
            "",
            BTreeMap::new(),
            BTreeMap::new(),
        );
        assert!(meta.name.is_none());
        assert!(meta.labels.is_none());
        assert!(meta.annotations.is_none());
    }

    #[test]
    fn builder_is_deterministic() {
        let mesh = persisted_mesh();
        let build = || {
            OwnedObjectMeta.object_meta(
                &mesh,
                "gw",
                labels(&[("app", "x")]),
                BTreeMap::new(),
            )
        };
        assert_eq!(build(), build());
    }
}
