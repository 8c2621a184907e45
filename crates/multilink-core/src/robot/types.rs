//! Robot description document tree

use serde::{Deserialize, Serialize};

use crate::inertia::InertiaMatrix;
use crate::material::MaterialPalette;

/// Pose (position and orientation)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub xyz: [f64; 3],
    pub rpy: [f64; 3], // roll, pitch, yaw in radians
}

impl Pose {
    pub fn new(xyz: [f64; 3], rpy: [f64; 3]) -> Self {
        Self { xyz, rpy }
    }

    pub fn from_position(xyz: [f64; 3]) -> Self {
        Self { xyz, rpy: [0.0; 3] }
    }
}

/// Mesh geometry referenced by a link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshGeometry {
    /// Mesh URI relative to the URDF file
    pub filename: String,
    pub scale: [f64; 3],
}

impl MeshGeometry {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            scale: [1.0; 3],
        }
    }
}

/// Visual element of a link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualElement {
    pub origin: Pose,
    pub geometry: MeshGeometry,
    /// Reference to a palette material by name
    pub material_name: Option<String>,
}

/// Collision element of a link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionElement {
    pub origin: Pose,
    pub geometry: MeshGeometry,
}

/// Inertial properties for a link
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InertialProperties {
    pub origin: Pose,
    pub mass: f64,
    pub inertia: InertiaMatrix,
}

/// A rigid body in the chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub name: String,
    pub inertial: InertialProperties,
    pub visual: Option<VisualElement>,
    pub collision: Option<CollisionElement>,
}

/// Joint type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JointType {
    Fixed,
    Revolute,
}

impl JointType {
    /// Check if this joint type has an axis
    pub fn has_axis(&self) -> bool {
        matches!(self, JointType::Revolute)
    }

    /// URDF `type` attribute value
    pub fn as_str(&self) -> &'static str {
        match self {
            JointType::Fixed => "fixed",
            JointType::Revolute => "revolute",
        }
    }
}

/// Joint limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointLimits {
    /// Lower position limit (rad)
    pub lower: f64,
    /// Upper position limit (rad)
    pub upper: f64,
    /// Maximum effort (Nm)
    pub effort: f64,
    /// Maximum velocity (rad/s)
    pub velocity: f64,
}

/// Connection between a parent and a child link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Joint {
    pub name: String,
    pub joint_type: JointType,
    pub origin: Pose,
    pub parent: String,
    pub child: String,
    pub axis: Option<[f64; 3]>,
    pub limits: Option<JointLimits>,
}

/// Complete articulated-body description of one dataset instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotDescription {
    /// Name of the `<robot>` root element
    pub name: String,
    pub base: Link,
    pub materials: MaterialPalette,
    /// Generated chain links, `link_0` first
    pub links: Vec<Link>,
    pub joints: Vec<Joint>,
}

impl RobotDescription {
    pub fn joint(&self, name: &str) -> Option<&Joint> {
        self.joints.iter().find(|j| j.name == name)
    }

    /// Number of generated chain links (excluding the base)
    pub fn chain_len(&self) -> usize {
        self.links.len()
    }
}
