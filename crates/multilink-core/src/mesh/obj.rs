//! OBJ mesh file loading and writing

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{Mesh, MeshError, mesh_name};

/// Load an OBJ file, merging all of its models into one mesh
pub fn load_obj(path: impl AsRef<Path>) -> Result<Mesh, MeshError> {
    let path = path.as_ref();

    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .map_err(|e| MeshError::Parse(e.to_string()))?;

    if models.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    let mut vertices: Vec<[f32; 3]> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    for model in &models {
        let mesh = &model.mesh;
        let vertex_offset = vertices.len() as u32;

        // Positions are in groups of 3
        for chunk in mesh.positions.chunks(3) {
            if chunk.len() == 3 {
                vertices.push([chunk[0], chunk[1], chunk[2]]);
            }
        }

        indices.extend(mesh.indices.iter().map(|&idx| vertex_offset + idx));
    }

    if vertices.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    Ok(Mesh::new(mesh_name(path), vertices, indices))
}

/// Write a mesh as a plain OBJ (positions and triangular faces only)
pub fn save_obj(mesh: &Mesh, path: impl AsRef<Path>) -> Result<(), MeshError> {
    let file = File::create(path.as_ref()).map_err(|e| MeshError::Io(e.to_string()))?;
    let mut writer = BufWriter::new(file);
    write_obj(mesh, &mut writer).map_err(|e| MeshError::Write(e.to_string()))?;
    writer.flush().map_err(|e| MeshError::Write(e.to_string()))
}

fn write_obj(mesh: &Mesh, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "o {}", mesh.name)?;
    for v in &mesh.vertices {
        writeln!(out, "v {} {} {}", v[0], v[1], v[2])?;
    }
    // OBJ indices are 1-based
    for tri in mesh.indices.chunks(3) {
        if tri.len() == 3 {
            writeln!(out, "f {} {} {}", tri[0] + 1, tri[1] + 1, tri[2] + 1)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_obj_text() {
        let mesh = Mesh::new(
            "tri",
            vec![[0.0, 0.0, 0.0], [1.5, 0.0, 0.0], [0.0, 1.0, -2.0]],
            vec![0, 1, 2],
        );
        let mut buf = Vec::new();
        write_obj(&mesh, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "o tri\nv 0 0 0\nv 1.5 0 0\nv 0 1 -2\nf 1 2 3\n");
    }

    #[test]
    fn test_save_then_load_obj() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("tetra.obj");
        let mesh = Mesh::new(
            "tetra",
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.25]],
            vec![0, 2, 1, 0, 1, 3, 0, 3, 2, 1, 2, 3],
        );
        save_obj(&mesh, &path).unwrap();

        let loaded = load_obj(&path).unwrap();
        assert_eq!(loaded.name, "tetra");
        assert_eq!(loaded.indices.len(), 12);
        let max_z = loaded.vertices.iter().map(|v| v[2]).fold(f32::MIN, f32::max);
        assert_eq!(max_z, 0.25);
    }

    #[test]
    fn test_load_missing_obj() {
        let temp = tempdir().unwrap();
        let result = load_obj(temp.path().join("missing.obj"));
        assert!(result.is_err());
    }
}
