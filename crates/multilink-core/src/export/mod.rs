//! URDF export functionality

mod xml;

use std::path::Path;

use crate::robot::RobotDescription;

pub use xml::{generate_urdf_string, xml_escape};

/// Write a robot description to `path` as URDF, returning the written text
pub fn export_urdf(robot: &RobotDescription, path: impl AsRef<Path>) -> Result<String, ExportError> {
    let path = path.as_ref();
    let urdf = generate_urdf_string(robot);
    std::fs::write(path, &urdf).map_err(|e| ExportError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(urdf)
}

/// Export-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExportError {
    #[error("IO error at {path}: {reason}")]
    Io { path: String, reason: String },
}
