//! Joint construction

use std::f64::consts::FRAC_PI_2;

use crate::constants::{
    BASE_LINK_NAME, JOINT_AXIS, JOINT_EFFORT_LIMIT, JOINT_LOWER_LIMIT, JOINT_UPPER_LIMIT,
    JOINT_VELOCITY_LIMIT,
};

use super::types::{Joint, JointLimits, JointType, Pose};

/// Limits shared by every revolute joint in a chain
pub fn revolute_limits() -> JointLimits {
    JointLimits {
        lower: JOINT_LOWER_LIMIT,
        upper: JOINT_UPPER_LIMIT,
        effort: JOINT_EFFORT_LIMIT,
        velocity: JOINT_VELOCITY_LIMIT,
    }
}

/// Revolute joint about +Y with the standard chain limits
pub fn revolute_joint(
    name: impl Into<String>,
    origin_xyz: [f64; 3],
    child: impl Into<String>,
    parent: impl Into<String>,
) -> Joint {
    Joint {
        name: name.into(),
        joint_type: JointType::Revolute,
        origin: Pose::from_position(origin_xyz),
        parent: parent.into(),
        child: child.into(),
        axis: Some(JOINT_AXIS),
        limits: Some(revolute_limits()),
    }
}

/// Fixed joint mounting the last chain link onto the base frame.
///
/// The chain frame is rotated by roll = π/2, yaw = −π/2 and shifted along x
/// by half the chain length.
pub fn base_mount_joint(name: impl Into<String>, last_link: impl Into<String>, chain_len: usize) -> Joint {
    let offset = chain_len as f64 / 2.0;
    Joint {
        name: name.into(),
        joint_type: JointType::Fixed,
        origin: Pose::new([offset, 0.0, 0.0], [FRAC_PI_2, 0.0, -FRAC_PI_2]),
        parent: BASE_LINK_NAME.to_string(),
        child: last_link.into(),
        axis: None,
        limits: None,
    }
}
