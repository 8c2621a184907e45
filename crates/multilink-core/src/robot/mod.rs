//! Robot description model and chain assembly

mod assembler;
mod joint;
mod link;
mod types;

pub use assembler::{AssembleError, AssembledRobot, RobotAssembler, joint_name, link_name};
pub use joint::{base_mount_joint, revolute_joint, revolute_limits};
pub use link::{base_link, build_link};
pub use types::{
    CollisionElement, InertialProperties, Joint, JointLimits, JointType, Link, MeshGeometry, Pose,
    RobotDescription, VisualElement,
};
