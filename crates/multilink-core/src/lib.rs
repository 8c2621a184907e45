//! Multilink dataset core
//!
//! This crate generates datasets of snake-like articulated robots:
//! - Mesh: primitive mesh loading/export and scaled variations
//! - Inertia: inertia tensors derived from mesh geometry
//! - Robot: links, joints, materials and chain assembly
//! - Export: URDF serialization of an assembled robot
//! - Dataset: instance directories, metadata and train/val/test manifest

pub mod constants;
pub mod dataset;
pub mod export;
pub mod inertia;
pub mod material;
pub mod mesh;
pub mod robot;
pub mod seed;
pub mod variation;
pub mod verify;

pub use constants::*;
pub use dataset::*;
pub use export::*;
pub use inertia::*;
pub use material::*;
pub use mesh::*;
pub use robot::*;
pub use seed::*;
pub use variation::*;
pub use verify::*;
