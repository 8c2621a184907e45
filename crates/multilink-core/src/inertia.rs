//! Inertia tensor calculations

use glam::{DMat3, DVec3};
use serde::{Deserialize, Serialize};

use crate::mesh::{Mesh, MeshError};

/// Inertia tensor (symmetric 3x3 matrix)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InertiaMatrix {
    pub ixx: f64,
    pub ixy: f64,
    pub ixz: f64,
    pub iyy: f64,
    pub iyz: f64,
    pub izz: f64,
}

impl Default for InertiaMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl InertiaMatrix {
    /// Unit diagonal tensor, used for the base link
    pub const IDENTITY: Self = Self {
        ixx: 1.0,
        ixy: 0.0,
        ixz: 0.0,
        iyy: 1.0,
        iyz: 0.0,
        izz: 1.0,
    };

    /// Create an inertia matrix for a solid box
    pub fn box_inertia(mass: f64, width: f64, height: f64, depth: f64) -> Self {
        let w2 = width * width;
        let h2 = height * height;
        let d2 = depth * depth;
        let k = mass / 12.0;
        Self {
            ixx: k * (h2 + d2),
            ixy: 0.0,
            ixz: 0.0,
            iyy: k * (w2 + d2),
            iyz: 0.0,
            izz: k * (w2 + h2),
        }
    }

    /// Calculate approximate inertia from mesh bounding box
    pub fn from_bounding_box(mass: f64, bbox_min: [f32; 3], bbox_max: [f32; 3]) -> Self {
        let width = (bbox_max[0] - bbox_min[0]) as f64;
        let height = (bbox_max[1] - bbox_min[1]) as f64;
        let depth = (bbox_max[2] - bbox_min[2]) as f64;
        Self::box_inertia(mass, width, height, depth)
    }

    fn from_mat3(m: DMat3) -> Self {
        Self {
            ixx: m.x_axis.x,
            ixy: m.y_axis.x,
            ixz: m.z_axis.x,
            iyy: m.y_axis.y,
            iyz: m.z_axis.y,
            izz: m.z_axis.z,
        }
    }

    /// Check if the inertia matrix is physically valid
    pub fn is_valid(&self) -> bool {
        // Diagonal elements must be positive
        if self.ixx <= 0.0 || self.iyy <= 0.0 || self.izz <= 0.0 {
            return false;
        }

        // Triangle inequality: each diagonal must be <= sum of other two
        let ixx = self.ixx;
        let iyy = self.iyy;
        let izz = self.izz;

        ixx <= iyy + izz && iyy <= ixx + izz && izz <= ixx + iyy
    }
}

/// Source of per-link inertia tensors
pub trait InertiaSource {
    fn inertia(&self, mesh: &Mesh) -> Result<InertiaMatrix, MeshError>;
}

/// Inertia model applied to generated links
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InertiaModel {
    /// [`VolumetricInertia`]
    #[default]
    Volumetric,
    /// [`BoundingBoxInertia`] at the given link mass
    BoundingBox,
}

impl InertiaModel {
    pub fn source(self, link_mass: f64) -> Box<dyn InertiaSource> {
        match self {
            InertiaModel::Volumetric => Box::new(VolumetricInertia),
            InertiaModel::BoundingBox => Box::new(BoundingBoxInertia { mass: link_mass }),
        }
    }
}

/// Unit-density inertia about the mesh centroid, integrated over the
/// signed tetrahedra each face forms with the origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct VolumetricInertia;

impl InertiaSource for VolumetricInertia {
    fn inertia(&self, mesh: &Mesh) -> Result<InertiaMatrix, MeshError> {
        let props = MassProperties::from_mesh(mesh)?;
        Ok(props.inertia)
    }
}

/// Solid-box inertia over the mesh bounds with a fixed mass
#[derive(Debug, Clone, Copy)]
pub struct BoundingBoxInertia {
    pub mass: f64,
}

impl InertiaSource for BoundingBoxInertia {
    fn inertia(&self, mesh: &Mesh) -> Result<InertiaMatrix, MeshError> {
        if mesh.vertices.is_empty() {
            return Err(MeshError::EmptyMesh);
        }
        let (min, max) = mesh.bounding_box();
        Ok(InertiaMatrix::from_bounding_box(self.mass, min, max))
    }
}

/// Volume, centroid and centroidal inertia of a closed mesh at unit density
#[derive(Debug, Clone, Copy)]
pub struct MassProperties {
    pub volume: f64,
    pub center_of_mass: [f64; 3],
    pub inertia: InertiaMatrix,
}

impl MassProperties {
    pub fn from_mesh(mesh: &Mesh) -> Result<Self, MeshError> {
        // Second moment of the reference tetrahedron (0, e1, e2, e3)
        let canonical =
            DMat3::from_cols_array(&[2.0, 1.0, 1.0, 1.0, 2.0, 1.0, 1.0, 1.0, 2.0]) * (1.0 / 120.0);

        let mut covariance = DMat3::ZERO;
        let mut first_moment = DVec3::ZERO;
        let mut volume = 0.0;
        let mut faces = 0usize;

        for [a, b, c] in mesh.triangles() {
            let a = DVec3::new(a[0] as f64, a[1] as f64, a[2] as f64);
            let b = DVec3::new(b[0] as f64, b[1] as f64, b[2] as f64);
            let c = DVec3::new(c[0] as f64, c[1] as f64, c[2] as f64);

            let basis = DMat3::from_cols(a, b, c);
            let det = basis.determinant();

            covariance += basis * canonical * basis.transpose() * det;
            first_moment += (a + b + c) * (det / 24.0);
            volume += det / 6.0;
            faces += 1;
        }

        if faces == 0 {
            return Err(MeshError::EmptyMesh);
        }
        if volume.abs() < f64::EPSILON {
            return Err(MeshError::Degenerate(format!(
                "mesh '{}' encloses no volume",
                mesh.name
            )));
        }

        // Inward-facing winding flips every signed quantity
        if volume < 0.0 {
            volume = -volume;
            first_moment = -first_moment;
            covariance = covariance * -1.0;
        }

        let com = first_moment / volume;
        let outer = DMat3::from_cols(com * com.x, com * com.y, com * com.z);
        let centered = covariance - outer * volume;

        let trace = centered.x_axis.x + centered.y_axis.y + centered.z_axis.z;
        let tensor = DMat3::from_diagonal(DVec3::splat(trace)) - centered;

        Ok(Self {
            volume,
            center_of_mass: com.to_array(),
            inertia: InertiaMatrix::from_mat3(tensor),
        })
    }
}
