//! Scaled variations of primitive meshes

use std::path::{Path, PathBuf};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_SCALE_RANGE;
use crate::mesh::{MeshError, MeshFormat, MeshIo};

/// Half-open range `[min, max)` scale factors are drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleRange {
    pub min: f64,
    pub max: f64,
}

impl Default for ScaleRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_SCALE_RANGE.0,
            max: DEFAULT_SCALE_RANGE.1,
        }
    }
}

impl ScaleRange {
    pub fn new(min: f64, max: f64) -> Option<Self> {
        let range = Self { min, max };
        range.is_valid().then_some(range)
    }

    pub fn is_valid(&self) -> bool {
        self.min > 0.0 && self.min < self.max
    }

    pub fn sample(&self, rng: &mut impl Rng) -> f64 {
        rng.gen_range(self.min..self.max)
    }
}

/// One persisted variation of a primitive
#[derive(Debug, Clone, PartialEq)]
pub struct MeshVariation {
    pub source: PathBuf,
    pub path: PathBuf,
    /// Factors as applied to the f32 vertex data
    pub x_scale: f32,
    pub y_scale: f32,
}

/// List the supported mesh files of a primitive directory, sorted by name
pub fn discover_primitives(dir: &Path) -> Result<Vec<PathBuf>, VariationError> {
    if !dir.is_dir() {
        return Err(VariationError::InputNotFound(dir.display().to_string()));
    }

    let entries = std::fs::read_dir(dir).map_err(|e| VariationError::Io {
        path: dir.display().to_string(),
        reason: e.to_string(),
    })?;

    let mut primitives = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| VariationError::Io {
                path: dir.display().to_string(),
                reason: e.to_string(),
            })?
            .path();
        if !path.is_file() {
            continue;
        }
        if MeshFormat::from_path(&path).is_supported() {
            primitives.push(path);
        } else {
            tracing::debug!(path = %path.display(), "Skipping non-mesh file");
        }
    }

    if primitives.is_empty() {
        return Err(VariationError::InputNotFound(format!(
            "{} (no OBJ or STL meshes)",
            dir.display()
        )));
    }

    primitives.sort();
    Ok(primitives)
}

/// Create `count` scaled copies of every primitive in `primitives_dir`.
///
/// Copy `i` of primitive `cube.obj` is written to `meshes_dir/cube_i.obj`
/// with vertex x and y multiplied by independent samples of `range`.
pub fn create_primitive_variations(
    primitives_dir: &Path,
    meshes_dir: &Path,
    count: usize,
    range: ScaleRange,
    mesh_io: &dyn MeshIo,
    rng: &mut impl Rng,
) -> Result<Vec<MeshVariation>, VariationError> {
    if !range.is_valid() {
        return Err(VariationError::InvalidScaleRange(range.min, range.max));
    }

    let primitives = discover_primitives(primitives_dir)?;
    tracing::info!(
        primitives = primitives.len(),
        per_primitive = count,
        "Creating mesh variations"
    );

    let mut variations = Vec::with_capacity(primitives.len() * count);
    for source in &primitives {
        let mesh = mesh_io
            .load(source)
            .map_err(|e| VariationError::mesh(source, e))?;
        let stem = crate::mesh::mesh_name(source);
        let ext = source
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("obj")
            .to_lowercase();

        for i in 0..count {
            let x_scale = range.sample(rng) as f32;
            let y_scale = range.sample(rng) as f32;

            let mut scaled = mesh.clone();
            scaled.name = format!("{stem}_{i}");
            scaled.scale_xy(x_scale, y_scale);

            let path = meshes_dir.join(format!("{stem}_{i}.{ext}"));
            mesh_io
                .export(&scaled, &path)
                .map_err(|e| VariationError::mesh(&path, e))?;

            variations.push(MeshVariation {
                source: source.clone(),
                path,
                x_scale,
                y_scale,
            });
        }
    }

    Ok(variations)
}

/// Variation-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum VariationError {
    #[error("Primitive input not found: {0}")]
    InputNotFound(String),
    #[error("Invalid scale range [{0}, {1})")]
    InvalidScaleRange(f64, f64),
    #[error("IO error at {path}: {reason}")]
    Io { path: String, reason: String },
    #[error("Mesh {path}: {source}")]
    MeshIo {
        path: String,
        #[source]
        source: MeshError,
    },
}

impl VariationError {
    fn mesh(path: &Path, source: MeshError) -> Self {
        VariationError::MeshIo {
            path: path.display().to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{FileMeshIo, Mesh};
    use crate::seed::{SeedStream, stream_rng};
    use tempfile::tempdir;

    fn box_mesh(name: &str) -> Mesh {
        Mesh::new(
            name,
            vec![
                [-1.0, -1.0, -1.0],
                [1.0, -1.0, -1.0],
                [1.0, 1.0, -1.0],
                [-1.0, 1.0, 0.5],
            ],
            vec![0, 1, 2, 0, 2, 3, 0, 3, 1, 1, 3, 2],
        )
    }

    fn setup() -> (tempfile::TempDir, PathBuf, PathBuf) {
        let temp = tempdir().unwrap();
        let primitives = temp.path().join("primitives");
        let meshes = temp.path().join("meshes");
        std::fs::create_dir(&primitives).unwrap();
        std::fs::create_dir(&meshes).unwrap();
        FileMeshIo
            .export(&box_mesh("cube"), &primitives.join("cube.obj"))
            .unwrap();
        FileMeshIo
            .export(&box_mesh("wedge"), &primitives.join("wedge.stl"))
            .unwrap();
        std::fs::write(primitives.join("README.txt"), "not a mesh").unwrap();
        (temp, primitives, meshes)
    }

    #[test]
    fn test_variation_pool() {
        let (_temp, primitives, meshes) = setup();
        let mut rng = stream_rng(3, SeedStream::Variations);
        let pool = create_primitive_variations(
            &primitives,
            &meshes,
            4,
            ScaleRange::default(),
            &FileMeshIo,
            &mut rng,
        )
        .unwrap();

        assert_eq!(pool.len(), 8);
        assert_eq!(pool[0].path, meshes.join("cube_0.obj"));
        assert_eq!(pool[7].path, meshes.join("wedge_3.stl"));
        for variation in &pool {
            assert!(variation.path.exists());
            assert!((0.05..=0.15).contains(&variation.x_scale));
            assert!((0.05..=0.15).contains(&variation.y_scale));
        }
    }

    #[test]
    fn test_variation_keeps_z() {
        let (_temp, primitives, meshes) = setup();
        let mut rng = stream_rng(8, SeedStream::Variations);
        let pool = create_primitive_variations(
            &primitives,
            &meshes,
            2,
            ScaleRange::default(),
            &FileMeshIo,
            &mut rng,
        )
        .unwrap();

        let source = FileMeshIo.load(&primitives.join("cube.obj")).unwrap();
        for variation in pool.iter().filter(|v| v.source.ends_with("cube.obj")) {
            let scaled = FileMeshIo.load(&variation.path).unwrap();
            assert_eq!(scaled.vertices.len(), source.vertices.len());
            for (a, b) in source.vertices.iter().zip(&scaled.vertices) {
                assert_eq!(a[2], b[2]);
                assert_eq!(b[0], a[0] * variation.x_scale);
                assert_eq!(b[1], a[1] * variation.y_scale);
            }
        }
    }

    #[test]
    fn test_missing_primitive_dir() {
        let temp = tempdir().unwrap();
        let mut rng = stream_rng(0, SeedStream::Variations);
        let result = create_primitive_variations(
            &temp.path().join("nope"),
            temp.path(),
            1,
            ScaleRange::default(),
            &FileMeshIo,
            &mut rng,
        );
        assert!(matches!(result, Err(VariationError::InputNotFound(_))));
    }

    #[test]
    fn test_empty_primitive_dir() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join("notes.md"), "# nothing").unwrap();
        assert!(matches!(
            discover_primitives(temp.path()),
            Err(VariationError::InputNotFound(_))
        ));
    }

    #[test]
    fn test_scale_range() {
        assert!(ScaleRange::new(0.2, 0.1).is_none());
        assert!(ScaleRange::new(0.0, 0.1).is_none());
        let range = ScaleRange::new(0.5, 0.6).unwrap();
        let mut rng = stream_rng(1, SeedStream::Variations);
        for _ in 0..100 {
            let s = range.sample(&mut rng);
            assert!((0.5..0.6).contains(&s));
        }
    }
}
