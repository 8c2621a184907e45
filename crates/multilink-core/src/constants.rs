//! Global constants for multilink-core

/// Default scale range applied to primitive x/y axes (half-open)
pub const DEFAULT_SCALE_RANGE: (f64, f64) = (0.05, 0.15);

/// Mass of every generated chain link (kg)
pub const LINK_MASS: f64 = 0.75;

/// Mass of the fixed base link (kg)
pub const BASE_MASS: f64 = 1.0;

/// Name of the link every chain is mounted on
pub const BASE_LINK_NAME: &str = "base";

/// Revolute joint limits (rad), written with the fixed precision of the dataset format
#[allow(clippy::approx_constant)]
pub const JOINT_LOWER_LIMIT: f64 = -1.57079632679;
#[allow(clippy::approx_constant)]
pub const JOINT_UPPER_LIMIT: f64 = 1.57079632679;

/// Revolute joint effort limit
pub const JOINT_EFFORT_LIMIT: f64 = 10.0;

/// Revolute joint velocity limit
pub const JOINT_VELOCITY_LIMIT: f64 = 3.0;

/// Rotation axis of every revolute joint
pub const JOINT_AXIS: [f64; 3] = [0.0, 1.0, 0.0];

/// Offset between consecutive links along z
pub const LINK_SPACING: f64 = 1.0;

/// Prefix of the robot root element name
pub const ROBOT_NAME_PREFIX: &str = "partnet_";

/// File name of each instance's robot description
pub const URDF_FILE_NAME: &str = "mobility_inertia.urdf";

/// File name of instance metadata and of the dataset manifest
pub const META_FILE_NAME: &str = "meta.json";

/// Sub-directory holding an instance's copied meshes
pub const MESH_DIR_NAME: &str = "meshes";

/// Width of zero-padded instance identifiers
pub const INSTANCE_ID_WIDTH: usize = 6;

/// Default share of instances assigned to the train split
pub const DEFAULT_TRAIN_FRACTION: f64 = 0.8;
