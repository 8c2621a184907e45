//! Structural checks on serialized chain robots
//!
//! Parses URDF text back with `urdf-rs` and confirms the chain shape the
//! assembler promises: `base` is the only root, `link_0..link_{N-1}` form a
//! single path to it, exactly one joint is fixed, and every revolute joint
//! uses the standard axis and limits.

use std::collections::{HashMap, HashSet};

use crate::constants::{BASE_LINK_NAME, JOINT_AXIS, JOINT_LOWER_LIMIT, JOINT_UPPER_LIMIT};
use crate::robot::{joint_name, link_name};

/// Summary of a verified description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainReport {
    pub robot_name: String,
    pub chain_len: usize,
    pub revolute_joints: usize,
    pub fixed_joints: usize,
    pub materials: usize,
}

/// Parse URDF text and check the chain invariants
pub fn verify_urdf(text: &str) -> Result<ChainReport, VerifyError> {
    let robot = urdf_rs::read_from_string(text).map_err(|e| VerifyError::UrdfParse(e.to_string()))?;
    check_chain(&robot)
}

/// Check the chain invariants of an already parsed robot
pub fn check_chain(robot: &urdf_rs::Robot) -> Result<ChainReport, VerifyError> {
    let chain_len = robot.links.len().saturating_sub(1);
    if chain_len == 0 {
        return Err(structure("robot has no chain links"));
    }

    let names: HashSet<&str> = robot.links.iter().map(|l| l.name.as_str()).collect();
    if names.len() != robot.links.len() {
        return Err(structure("duplicate link names"));
    }
    if !names.contains(BASE_LINK_NAME) {
        return Err(structure("missing base link"));
    }
    for i in 0..chain_len {
        if !names.contains(link_name(i).as_str()) {
            return Err(structure(format!("missing {}", link_name(i))));
        }
    }

    if robot.joints.len() != chain_len {
        return Err(structure(format!(
            "expected {} joints, found {}",
            chain_len,
            robot.joints.len()
        )));
    }

    // child -> parent, each child claimed once
    let mut parent_of: HashMap<&str, &str> = HashMap::new();
    let mut fixed_joints = 0;
    let mut revolute_joints = 0;
    for (i, joint) in robot.joints.iter().enumerate() {
        if !robot.joints.iter().any(|j| j.name == joint_name(i)) {
            return Err(structure(format!("missing {}", joint_name(i))));
        }
        let parent = joint.parent.link.as_str();
        let child = joint.child.link.as_str();
        if !names.contains(parent) || !names.contains(child) {
            return Err(structure(format!("{} references an unknown link", joint.name)));
        }
        if parent_of.insert(child, parent).is_some() {
            return Err(structure(format!("{child} has more than one parent")));
        }

        match joint.joint_type {
            urdf_rs::JointType::Fixed => {
                fixed_joints += 1;
                if parent != BASE_LINK_NAME || child != link_name(chain_len - 1) {
                    return Err(structure(format!(
                        "fixed joint {} must mount {} on {}",
                        joint.name,
                        link_name(chain_len - 1),
                        BASE_LINK_NAME
                    )));
                }
            }
            urdf_rs::JointType::Revolute => {
                revolute_joints += 1;
                if joint.axis.xyz.0 != JOINT_AXIS {
                    return Err(structure(format!("{} has a non-standard axis", joint.name)));
                }
                if joint.limit.lower != JOINT_LOWER_LIMIT || joint.limit.upper != JOINT_UPPER_LIMIT {
                    return Err(structure(format!("{} has non-standard limits", joint.name)));
                }
            }
            _ => {
                return Err(structure(format!("{} has an unexpected type", joint.name)));
            }
        }
    }

    if fixed_joints != 1 {
        return Err(structure(format!("expected one fixed joint, found {fixed_joints}")));
    }
    if parent_of.contains_key(BASE_LINK_NAME) {
        return Err(structure("base link has a parent"));
    }

    // Walk from link_0 up to the root; a linear chain visits every link once
    let first = link_name(0);
    let mut current = first.as_str();
    let mut visited = HashSet::from([current]);
    while let Some(&parent) = parent_of.get(current) {
        if !visited.insert(parent) {
            return Err(structure("cycle in joint graph"));
        }
        current = parent;
    }
    if current != BASE_LINK_NAME {
        return Err(structure(format!("chain ends at {current} instead of base")));
    }
    if visited.len() != robot.links.len() {
        return Err(structure("chain is branched or disconnected"));
    }

    Ok(ChainReport {
        robot_name: robot.name.clone(),
        chain_len,
        revolute_joints,
        fixed_joints,
        materials: robot.materials.len(),
    })
}

fn structure(msg: impl Into<String>) -> VerifyError {
    VerifyError::Structure(msg.into())
}

/// Verification errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum VerifyError {
    #[error("Failed to parse URDF: {0}")]
    UrdfParse(String),
    #[error("Invalid chain: {0}")]
    Structure(String),
}
