//! STL mesh file loading and writing

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::{Mesh, MeshError, mesh_name};

/// Load an STL file (binary or ASCII)
pub fn load_stl(path: impl AsRef<Path>) -> Result<Mesh, MeshError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| MeshError::Io(e.to_string()))?;
    let mut reader = BufReader::new(file);

    let stl = stl_io::read_stl(&mut reader).map_err(|e| MeshError::Parse(e.to_string()))?;
    if stl.faces.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    let vertices = stl.vertices.iter().map(|v| [v[0], v[1], v[2]]).collect();
    let indices = stl
        .faces
        .iter()
        .flat_map(|face| face.vertices.iter().map(|&i| i as u32))
        .collect();

    Ok(Mesh::new(mesh_name(path), vertices, indices))
}

/// Save a mesh as a binary STL file
pub fn save_stl(mesh: &Mesh, path: impl AsRef<Path>) -> Result<(), MeshError> {
    let triangles: Vec<stl_io::Triangle> = mesh
        .triangles()
        .map(|[v0, v1, v2]| stl_io::Triangle {
            normal: stl_io::Normal::new(face_normal(v0, v1, v2)),
            vertices: [
                stl_io::Vertex::new(v0),
                stl_io::Vertex::new(v1),
                stl_io::Vertex::new(v2),
            ],
        })
        .collect();

    let file = File::create(path.as_ref()).map_err(|e| MeshError::Io(e.to_string()))?;
    let mut writer = BufWriter::new(file);
    stl_io::write_stl(&mut writer, triangles.iter()).map_err(|e| MeshError::Write(e.to_string()))
}

fn face_normal(v0: [f32; 3], v1: [f32; 3], v2: [f32; 3]) -> [f32; 3] {
    let e1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
    let e2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];
    let cross = [
        e1[1] * e2[2] - e1[2] * e2[1],
        e1[2] * e2[0] - e1[0] * e2[2],
        e1[0] * e2[1] - e1[1] * e2[0],
    ];
    let len = (cross[0] * cross[0] + cross[1] * cross[1] + cross[2] * cross[2]).sqrt();
    if len > 0.0 {
        [cross[0] / len, cross[1] / len, cross[2] / len]
    } else {
        [0.0, 0.0, 1.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_face_normal() {
        let n = face_normal([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert_eq!(n, [0.0, 0.0, 1.0]);
        // Degenerate triangle falls back to +Z
        let n = face_normal([0.0; 3], [0.0; 3], [0.0; 3]);
        assert_eq!(n, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_save_then_load_stl() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("tri.stl");
        let mesh = Mesh::new(
            "tri",
            vec![[0.0, 0.0, 0.0], [2.0, 0.0, 0.5], [0.0, 3.0, 0.5]],
            vec![0, 1, 2],
        );
        save_stl(&mesh, &path).unwrap();

        let loaded = load_stl(&path).unwrap();
        assert_eq!(loaded.name, "tri");
        assert_eq!(loaded.indices.len(), 3);
        assert_eq!(loaded.triangles().count(), 1);
    }
}
