//! Link construction

use crate::constants::{BASE_LINK_NAME, BASE_MASS};
use crate::inertia::InertiaMatrix;

use super::types::{CollisionElement, InertialProperties, Link, MeshGeometry, Pose, VisualElement};

/// Build a mesh-backed link.
///
/// Inertial, visual and collision share `pose`. The inertia tensor is used
/// exactly as given.
pub fn build_link(
    name: impl Into<String>,
    mesh_uri: &str,
    pose: Pose,
    mass: f64,
    material_name: impl Into<String>,
    inertia: InertiaMatrix,
) -> Link {
    Link {
        name: name.into(),
        inertial: InertialProperties {
            origin: pose,
            mass,
            inertia,
        },
        visual: Some(VisualElement {
            origin: pose,
            geometry: MeshGeometry::new(mesh_uri),
            material_name: Some(material_name.into()),
        }),
        collision: Some(CollisionElement {
            origin: pose,
            geometry: MeshGeometry::new(mesh_uri),
        }),
    }
}

/// The geometry-less link every chain is mounted on
pub fn base_link() -> Link {
    Link {
        name: BASE_LINK_NAME.to_string(),
        inertial: InertialProperties {
            origin: Pose::default(),
            mass: BASE_MASS,
            inertia: InertiaMatrix::IDENTITY,
        },
        visual: None,
        collision: None,
    }
}
