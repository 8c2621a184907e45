//! Dataset generation: instance directories, metadata and split manifest

mod config;
mod meta;
mod output;
mod split;

use std::path::{Path, PathBuf};

use rand::Rng;

use crate::constants::{LINK_MASS, META_FILE_NAME, URDF_FILE_NAME};
use crate::export::{ExportError, export_urdf};
use crate::inertia::InertiaSource;
use crate::mesh::{FileMeshIo, MeshError, MeshIo};
use crate::robot::{AssembleError, RobotAssembler};
use crate::seed::{SeedStream, entropy_seed, stream_rng};
use crate::variation::{VariationError, create_primitive_variations, discover_primitives};
use crate::verify::{VerifyError, verify_urdf};

pub use config::{DatasetConfig, OutputPolicy};
pub use meta::{DatasetManifest, InstanceMeta};
pub use output::{instance_id, next_instance_index, prepare_output_dir};
pub use split::{Split, SplitPolicy};

/// One generated instance
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceSummary {
    pub id: String,
    pub robot_name: String,
    pub chain_len: usize,
    pub split: Split,
}

/// Outcome of a generation run
#[derive(Debug, Clone)]
pub struct DatasetSummary {
    /// Seed the run can be replayed with
    pub base_seed: u64,
    /// Number of meshes in the variation pool
    pub pool_size: usize,
    pub instances: Vec<InstanceSummary>,
    /// Manifest as written, including instances from earlier runs in append mode
    pub manifest: DatasetManifest,
}

/// Drives variation, assembly and bookkeeping for a whole dataset
pub struct DatasetGenerator {
    config: DatasetConfig,
    mesh_io: Box<dyn MeshIo>,
    inertia: Box<dyn InertiaSource>,
}

impl DatasetGenerator {
    /// Generator using file-based mesh IO and the configured inertia model
    pub fn new(config: DatasetConfig) -> Self {
        let inertia = config.inertia.source(LINK_MASS);
        Self {
            config,
            mesh_io: Box::new(FileMeshIo),
            inertia,
        }
    }

    pub fn with_mesh_io(mut self, mesh_io: Box<dyn MeshIo>) -> Self {
        self.mesh_io = mesh_io;
        self
    }

    pub fn with_inertia(mut self, inertia: Box<dyn InertiaSource>) -> Self {
        self.inertia = inertia;
        self
    }

    /// Generate the full dataset
    pub fn run(&self) -> Result<DatasetSummary, DatasetError> {
        let config = &self.config;
        config.validate()?;

        // Fail on missing or empty input before touching any output
        let primitives = discover_primitives(&config.primitives_dir)?;
        tracing::debug!(primitives = primitives.len(), "Found primitive meshes");

        let base_seed = config.seed.unwrap_or_else(entropy_seed);
        tracing::info!(seed = base_seed, "Starting dataset generation");

        prepare_output_dir(&config.meshes_dir, config.output_policy)?;
        prepare_output_dir(&config.output_dir, config.output_policy)?;

        let pool: Vec<PathBuf> = create_primitive_variations(
            &config.primitives_dir,
            &config.meshes_dir,
            config.variations_per_primitive,
            config.scale_range,
            self.mesh_io.as_ref(),
            &mut stream_rng(base_seed, SeedStream::Variations),
        )?
        .into_iter()
        .map(|v| v.path)
        .collect();
        if pool.is_empty() {
            return Err(DatasetError::EmptyMeshPool);
        }
        tracing::info!(pool = pool.len(), "Mesh variation pool ready");

        let manifest_path = config.output_dir.join(META_FILE_NAME);
        let (start, mut manifest) = match config.output_policy {
            OutputPolicy::Clean => (0, DatasetManifest::default()),
            OutputPolicy::Append => {
                let manifest = if manifest_path.exists() {
                    DatasetManifest::load(&manifest_path)?
                } else {
                    DatasetManifest::default()
                };
                (next_instance_index(&config.output_dir)?, manifest)
            }
        };

        let assembler = RobotAssembler::new(self.mesh_io.as_ref(), self.inertia.as_ref());
        let total = config.num_instances;
        let mut instances = Vec::with_capacity(total);

        for position in 0..total {
            let split = config.split.assign(position, total);
            let instance =
                self.generate_instance(&assembler, &pool, base_seed, start + position, split)?;
            manifest.push(split, instance.id.clone());
            instances.push(instance);
        }

        meta::write_json(&manifest_path, &manifest)?;
        tracing::info!(
            instances = instances.len(),
            train = manifest.train.len(),
            val = manifest.val.len(),
            test = manifest.test.len(),
            "Dataset written to {}",
            config.output_dir.display()
        );

        Ok(DatasetSummary {
            base_seed,
            pool_size: pool.len(),
            instances,
            manifest,
        })
    }

    /// Build and write one instance
    fn generate_instance(
        &self,
        assembler: &RobotAssembler,
        pool: &[PathBuf],
        base_seed: u64,
        index: usize,
        split: Split,
    ) -> Result<InstanceSummary, DatasetError> {
        let config = &self.config;
        let id = instance_id(index);
        let dir = config.output_dir.join(&id);
        std::fs::create_dir(&dir).map_err(|e| DatasetError::io(&dir, e))?;

        let mut rng = stream_rng(base_seed, SeedStream::Instance(index as u64));
        let chain_len = rng.gen_range(config.min_links..=config.max_links);
        let robot = assembler.assemble(chain_len, pool, &dir, &mut rng)?;

        let urdf = export_urdf(&robot.description, dir.join(URDF_FILE_NAME))?;
        if config.verify {
            verify_urdf(&urdf).map_err(|source| DatasetError::Verify {
                id: id.clone(),
                source,
            })?;
        }
        meta::write_json(&dir.join(META_FILE_NAME), &config.meta)?;

        tracing::debug!(
            id = %id,
            links = chain_len,
            meshes = robot.copied_meshes.len(),
            "Wrote instance"
        );
        Ok(InstanceSummary {
            id,
            robot_name: robot.description.name,
            chain_len,
            split,
        })
    }
}

/// Dataset generation errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum DatasetError {
    #[error("Input not found: {0}")]
    InputNotFound(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("No mesh variations were produced")]
    EmptyMeshPool,
    #[error("Mesh {path}: {source}")]
    MeshIo {
        path: String,
        #[source]
        source: MeshError,
    },
    #[error(transparent)]
    Assemble(#[from] AssembleError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("IO error at {path}: {reason}")]
    Io { path: String, reason: String },
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Instance {id} failed verification: {source}")]
    Verify {
        id: String,
        #[source]
        source: VerifyError,
    },
}

impl DatasetError {
    pub(crate) fn io(path: &Path, e: std::io::Error) -> Self {
        DatasetError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
    }
}

impl From<VariationError> for DatasetError {
    fn from(e: VariationError) -> Self {
        match e {
            VariationError::InputNotFound(path) => DatasetError::InputNotFound(path),
            VariationError::InvalidScaleRange(min, max) => {
                DatasetError::InvalidConfig(format!("invalid scale range [{min}, {max})"))
            }
            VariationError::Io { path, reason } => DatasetError::Io { path, reason },
            VariationError::MeshIo { path, source } => DatasetError::MeshIo { path, source },
        }
    }
}
