//! Chain assembly: sample meshes, build links/joints/materials

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use rand::Rng;
use rand::seq::SliceRandom;

use crate::constants::{LINK_MASS, LINK_SPACING, MESH_DIR_NAME, ROBOT_NAME_PREFIX};
use crate::inertia::InertiaSource;
use crate::material::{MaterialPalette, material_name};
use crate::mesh::{MeshError, MeshIo};

use super::joint::{base_mount_joint, revolute_joint};
use super::link::{base_link, build_link};
use super::types::{Pose, RobotDescription};

/// Name of the i-th chain link
pub fn link_name(index: usize) -> String {
    format!("link_{index}")
}

/// Name of the i-th joint
pub fn joint_name(index: usize) -> String {
    format!("joint_{index}")
}

/// Result of assembling one robot
#[derive(Debug, Clone)]
pub struct AssembledRobot {
    pub description: RobotDescription,
    /// Mesh files copied into the instance's mesh directory
    pub copied_meshes: BTreeSet<PathBuf>,
}

/// Builds chain robots from a pool of mesh variations
pub struct RobotAssembler<'a> {
    mesh_io: &'a dyn MeshIo,
    inertia: &'a dyn InertiaSource,
}

impl<'a> RobotAssembler<'a> {
    pub fn new(mesh_io: &'a dyn MeshIo, inertia: &'a dyn InertiaSource) -> Self {
        Self { mesh_io, inertia }
    }

    /// Assemble a chain of `chain_len` links.
    ///
    /// Meshes are drawn from `pool` with replacement and copied into
    /// `<instance_dir>/meshes`. The chain hangs off `base`: `link_{i+1}` is
    /// the parent of `link_i`, and the last link is fixed to `base`.
    pub fn assemble(
        &self,
        chain_len: usize,
        pool: &[PathBuf],
        instance_dir: &Path,
        rng: &mut impl Rng,
    ) -> Result<AssembledRobot, AssembleError> {
        if chain_len == 0 {
            return Err(AssembleError::InvalidChainLength);
        }
        if pool.is_empty() {
            return Err(AssembleError::EmptyMeshPool);
        }

        let robot_name = format!(
            "{}{}",
            ROBOT_NAME_PREFIX,
            uuid::Builder::from_random_bytes(rng.r#gen()).into_uuid().simple()
        );

        let mesh_dir = instance_dir.join(MESH_DIR_NAME);
        std::fs::create_dir_all(&mesh_dir).map_err(|e| AssembleError::Io {
            path: mesh_dir.display().to_string(),
            reason: e.to_string(),
        })?;

        let materials = MaterialPalette::random(chain_len, rng);

        let mut links = Vec::with_capacity(chain_len);
        let mut joints = Vec::with_capacity(chain_len);
        let mut copied_meshes = BTreeSet::new();

        for i in 0..chain_len {
            let source = pool.choose(rng).ok_or(AssembleError::EmptyMeshPool)?;
            let file_name = source
                .file_name()
                .ok_or_else(|| AssembleError::Copy {
                    from: source.display().to_string(),
                    to: mesh_dir.display().to_string(),
                    reason: "source has no file name".to_string(),
                })?
                .to_string_lossy()
                .to_string();

            let dest = mesh_dir.join(&file_name);
            std::fs::copy(source, &dest).map_err(|e| AssembleError::Copy {
                from: source.display().to_string(),
                to: dest.display().to_string(),
                reason: e.to_string(),
            })?;
            copied_meshes.insert(dest);

            let mesh = self
                .mesh_io
                .load(source)
                .map_err(|e| AssembleError::mesh(source, e))?;
            let inertia = self
                .inertia
                .inertia(&mesh)
                .map_err(|e| AssembleError::mesh(source, e))?;
            if !inertia.is_valid() {
                tracing::warn!(mesh = %source.display(), ?inertia, "Inertia tensor is not physically valid");
            }

            let material_id = materials
                .sample_id(rng)
                .ok_or(AssembleError::InvalidChainLength)?;
            let mesh_uri = format!("{MESH_DIR_NAME}/{file_name}");

            tracing::debug!(link = i, mesh = %file_name, material = material_id, "Adding link");
            links.push(build_link(
                link_name(i),
                &mesh_uri,
                Pose::default(),
                LINK_MASS,
                material_name(material_id),
                inertia,
            ));

            if i + 1 < chain_len {
                joints.push(revolute_joint(
                    joint_name(i),
                    [0.0, 0.0, LINK_SPACING],
                    link_name(i),
                    link_name(i + 1),
                ));
            }
        }

        joints.push(base_mount_joint(
            joint_name(chain_len - 1),
            link_name(chain_len - 1),
            chain_len,
        ));

        Ok(AssembledRobot {
            description: RobotDescription {
                name: robot_name,
                base: base_link(),
                materials,
                links,
                joints,
            },
            copied_meshes,
        })
    }
}

/// Assembly-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum AssembleError {
    #[error("Chain length must be at least 1")]
    InvalidChainLength,
    #[error("Mesh pool is empty")]
    EmptyMeshPool,
    #[error("IO error at {path}: {reason}")]
    Io { path: String, reason: String },
    #[error("Failed to copy mesh {from} to {to}: {reason}")]
    Copy {
        from: String,
        to: String,
        reason: String,
    },
    #[error("Mesh {path}: {source}")]
    MeshIo {
        path: String,
        #[source]
        source: MeshError,
    },
}

impl AssembleError {
    fn mesh(path: &Path, source: MeshError) -> Self {
        AssembleError::MeshIo {
            path: path.display().to_string(),
            source,
        }
    }
}
