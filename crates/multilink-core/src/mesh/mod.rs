//! Mesh file loading and export (OBJ, STL formats)

mod obj;
mod stl;

use std::path::Path;

pub use obj::{load_obj, save_obj};
pub use stl::{load_stl, save_stl};

/// Triangle mesh as read from a primitive or variation file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub name: String,
    /// Vertex positions
    pub vertices: Vec<[f32; 3]>,
    /// Triangle indices (3 per face)
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new(name: impl Into<String>, vertices: Vec<[f32; 3]>, indices: Vec<u32>) -> Self {
        Self {
            name: name.into(),
            vertices,
            indices,
        }
    }

    /// Scale vertex x and y coordinates, leaving z untouched
    pub fn scale_xy(&mut self, x_scale: f32, y_scale: f32) {
        for v in &mut self.vertices {
            v[0] *= x_scale;
            v[1] *= y_scale;
        }
    }

    /// Axis-aligned bounds as (min, max)
    pub fn bounding_box(&self) -> ([f32; 3], [f32; 3]) {
        if self.vertices.is_empty() {
            return ([0.0; 3], [0.0; 3]);
        }

        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        for v in &self.vertices {
            for i in 0..3 {
                min[i] = min[i].min(v[i]);
                max[i] = max[i].max(v[i]);
            }
        }
        (min, max)
    }

    /// Iterate triangles as vertex triples, skipping malformed index chunks
    pub fn triangles(&self) -> impl Iterator<Item = [[f32; 3]; 3]> + '_ {
        self.indices.chunks(3).filter_map(|tri| {
            if tri.len() != 3 {
                return None;
            }
            let a = *self.vertices.get(tri[0] as usize)?;
            let b = *self.vertices.get(tri[1] as usize)?;
            let c = *self.vertices.get(tri[2] as usize)?;
            Some([a, b, c])
        })
    }
}

/// Detect mesh format from file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    Stl,
    Obj,
    Unknown,
}

impl MeshFormat {
    /// Detect format from file path
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .as_deref()
        {
            Some("stl") => MeshFormat::Stl,
            Some("obj") => MeshFormat::Obj,
            _ => MeshFormat::Unknown,
        }
    }

    /// Check if the format is supported
    pub fn is_supported(&self) -> bool {
        matches!(self, MeshFormat::Stl | MeshFormat::Obj)
    }
}

/// Mesh load/export capability used by the generator
pub trait MeshIo {
    fn load(&self, path: &Path) -> Result<Mesh, MeshError>;
    fn export(&self, mesh: &Mesh, path: &Path) -> Result<(), MeshError>;
}

/// Filesystem mesh IO dispatching on file extension
#[derive(Debug, Clone, Copy, Default)]
pub struct FileMeshIo;

impl MeshIo for FileMeshIo {
    fn load(&self, path: &Path) -> Result<Mesh, MeshError> {
        load_mesh(path)
    }

    fn export(&self, mesh: &Mesh, path: &Path) -> Result<(), MeshError> {
        save_mesh(mesh, path)
    }
}

/// Load any supported mesh format
pub fn load_mesh(path: impl AsRef<Path>) -> Result<Mesh, MeshError> {
    let path = path.as_ref();
    match MeshFormat::from_path(path) {
        MeshFormat::Stl => load_stl(path),
        MeshFormat::Obj => load_obj(path),
        MeshFormat::Unknown => Err(unsupported(path)),
    }
}

/// Export a mesh in the format implied by the path's extension
pub fn save_mesh(mesh: &Mesh, path: impl AsRef<Path>) -> Result<(), MeshError> {
    let path = path.as_ref();
    match MeshFormat::from_path(path) {
        MeshFormat::Stl => save_stl(mesh, path),
        MeshFormat::Obj => save_obj(mesh, path),
        MeshFormat::Unknown => Err(unsupported(path)),
    }
}

fn unsupported(path: &Path) -> MeshError {
    MeshError::UnsupportedFormat(
        path.extension()
            .and_then(|e| e.to_str())
            .unwrap_or("unknown")
            .to_string(),
    )
}

/// Extract a mesh name from a file path
pub(crate) fn mesh_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed")
        .to_string()
}

/// Mesh-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum MeshError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Write error: {0}")]
    Write(String),
    #[error("Empty mesh: no geometry found")]
    EmptyMesh,
    #[error("Degenerate mesh: {0}")]
    Degenerate(String),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(MeshFormat::from_path(Path::new("a/cube.obj")), MeshFormat::Obj);
        assert_eq!(MeshFormat::from_path(Path::new("cube.OBJ")), MeshFormat::Obj);
        assert_eq!(MeshFormat::from_path(Path::new("cube.stl")), MeshFormat::Stl);
        assert_eq!(MeshFormat::from_path(Path::new("cube.dae")), MeshFormat::Unknown);
        assert!(!MeshFormat::Unknown.is_supported());
    }

    #[test]
    fn test_scale_xy_keeps_z() {
        let mut mesh = Mesh::new("m", vec![[1.0, 2.0, 3.0], [-4.0, 5.0, -6.0]], vec![]);
        mesh.scale_xy(0.5, 0.1);
        assert_eq!(mesh.vertices[0][2], 3.0);
        assert_eq!(mesh.vertices[1][2], -6.0);
        assert!((mesh.vertices[0][0] - 0.5).abs() < 1e-6);
        assert!((mesh.vertices[1][1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_bounding_box() {
        let mesh = Mesh::new("m", vec![[1.0, -2.0, 0.0], [-1.0, 2.0, 3.0]], vec![]);
        let (min, max) = mesh.bounding_box();
        assert_eq!(min, [-1.0, -2.0, 0.0]);
        assert_eq!(max, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_triangles_skip_bad_indices() {
        let mesh = Mesh::new(
            "m",
            vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![0, 1, 2, 0, 1, 7, 2],
        );
        assert_eq!(mesh.triangles().count(), 1);
    }

    #[test]
    fn test_load_unsupported() {
        let result = load_mesh("mesh.xyz");
        assert!(matches!(result, Err(MeshError::UnsupportedFormat(_))));
    }
}
