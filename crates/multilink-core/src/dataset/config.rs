//! Dataset generation options

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::inertia::InertiaModel;
use crate::variation::ScaleRange;

use super::DatasetError;
use super::meta::InstanceMeta;
use super::split::SplitPolicy;

/// What to do with existing output directories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputPolicy {
    /// Remove and recreate the mesh pool and dataset directories
    #[default]
    Clean,
    /// Keep existing content; new instances continue the numbering
    Append,
}

/// Dataset generation options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Directory of primitive meshes (must exist)
    pub primitives_dir: PathBuf,
    /// Output directory of the variation pool
    pub meshes_dir: PathBuf,
    /// Dataset root directory
    pub output_dir: PathBuf,
    /// Scaled copies created per primitive
    pub variations_per_primitive: usize,
    /// Robot instances to generate
    pub num_instances: usize,
    /// Inclusive chain length bounds
    pub min_links: usize,
    pub max_links: usize,
    pub split: SplitPolicy,
    pub output_policy: OutputPolicy,
    pub scale_range: ScaleRange,
    /// How link inertia is derived from each mesh
    pub inertia: InertiaModel,
    /// Base seed; drawn from OS entropy when unset
    pub seed: Option<u64>,
    /// Record written to every instance's meta.json
    pub meta: InstanceMeta,
    /// Parse each written URDF back and check the chain
    pub verify: bool,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            primitives_dir: PathBuf::from("./primitives"),
            meshes_dir: PathBuf::from("./meshes"),
            output_dir: PathBuf::from("./multilink"),
            variations_per_primitive: 10,
            num_instances: 40,
            min_links: 2,
            max_links: 3,
            split: SplitPolicy::default(),
            output_policy: OutputPolicy::default(),
            scale_range: ScaleRange::default(),
            inertia: InertiaModel::default(),
            seed: None,
            meta: InstanceMeta::default(),
            verify: false,
        }
    }
}

impl DatasetConfig {
    /// Reject option combinations the generator cannot honor
    pub fn validate(&self) -> Result<(), DatasetError> {
        if self.min_links == 0 {
            return Err(DatasetError::InvalidConfig(
                "min_links must be at least 1".to_string(),
            ));
        }
        if self.min_links > self.max_links {
            return Err(DatasetError::InvalidConfig(format!(
                "min_links ({}) exceeds max_links ({})",
                self.min_links, self.max_links
            )));
        }
        if !self.split.is_valid() {
            return Err(DatasetError::InvalidConfig(
                "train fraction must be in (0, 1]".to_string(),
            ));
        }
        if !self.scale_range.is_valid() {
            return Err(DatasetError::InvalidConfig(format!(
                "invalid scale range [{}, {})",
                self.scale_range.min, self.scale_range.max
            )));
        }
        // Clean output removes these directories; none may hold the primitives
        let primitives = resolve_path(&self.primitives_dir);
        for out in [&self.meshes_dir, &self.output_dir] {
            if primitives.starts_with(resolve_path(out)) {
                return Err(DatasetError::InvalidConfig(format!(
                    "output directory {} must not be or contain the primitive directory {}",
                    out.display(),
                    self.primitives_dir.display()
                )));
            }
        }
        Ok(())
    }
}

/// Canonical form of `path`, resolved through its nearest existing ancestor
fn resolve_path(path: &Path) -> PathBuf {
    let mut tail = Vec::new();
    let mut current = path;
    loop {
        let probe = if current.as_os_str().is_empty() {
            Path::new(".")
        } else {
            current
        };
        if let Ok(canonical) = probe.canonicalize() {
            return tail.iter().rev().fold(canonical, |acc, part| acc.join(part));
        }
        match (current.parent(), current.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name.to_os_string());
                current = parent;
            }
            _ => return path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_is_valid() {
        assert!(DatasetConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_link_bounds() {
        let config = DatasetConfig {
            min_links: 4,
            max_links: 2,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(DatasetError::InvalidConfig(_))));

        let config = DatasetConfig {
            min_links: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(DatasetError::InvalidConfig(_))));
    }

    #[test]
    fn test_output_must_not_clobber_primitives() {
        let config = DatasetConfig {
            output_dir: PathBuf::from("./primitives"),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(DatasetError::InvalidConfig(_))));
    }

    fn with_primitives(root: &Path) -> DatasetConfig {
        let primitives = root.join("work").join("primitives");
        std::fs::create_dir_all(&primitives).unwrap();
        DatasetConfig {
            primitives_dir: primitives,
            meshes_dir: root.join("meshes"),
            output_dir: root.join("multilink"),
            ..Default::default()
        }
    }

    #[test]
    fn test_aliased_primitive_dir_rejected() {
        let temp = tempdir().unwrap();
        let config = with_primitives(temp.path());
        assert!(config.validate().is_ok());

        let aliased = DatasetConfig {
            meshes_dir: config.primitives_dir.join("..").join("primitives"),
            ..config
        };
        assert!(matches!(aliased.validate(), Err(DatasetError::InvalidConfig(_))));
    }

    #[test]
    fn test_output_ancestor_of_primitives_rejected() {
        let temp = tempdir().unwrap();
        let config = with_primitives(temp.path());
        let ancestor = DatasetConfig {
            output_dir: temp.path().join("work"),
            ..config.clone()
        };
        assert!(matches!(ancestor.validate(), Err(DatasetError::InvalidConfig(_))));

        let root = DatasetConfig {
            meshes_dir: temp.path().to_path_buf(),
            ..config
        };
        assert!(matches!(root.validate(), Err(DatasetError::InvalidConfig(_))));
    }

    #[test]
    fn test_output_beside_primitives_allowed() {
        let temp = tempdir().unwrap();
        let config = DatasetConfig {
            meshes_dir: temp.path().join("work").join("meshes"),
            output_dir: temp.path().join("work").join("primitives_out"),
            ..with_primitives(temp.path())
        };
        assert!(config.validate().is_ok());
    }
}
