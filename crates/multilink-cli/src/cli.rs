//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use multilink_core::{DatasetConfig, InertiaModel, OutputPolicy, SplitPolicy};

use crate::config::{ConfigError, load_config, load_meta_template};

/// Procedural snake-robot URDF dataset generator
///
/// Flags override values from `--config`; unset flags keep the file's
/// values or the built-in defaults.
#[derive(Parser, Debug)]
#[command(name = "multilink-gen")]
#[command(about = "Generate a dataset of multi-link snake robot URDFs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// RON configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory of primitive meshes [default: ./primitives]
    #[arg(long, value_name = "DIR")]
    pub primitives: Option<PathBuf>,

    /// Output directory of the mesh variation pool [default: ./meshes]
    #[arg(long, value_name = "DIR")]
    pub meshes: Option<PathBuf>,

    /// Dataset root directory [default: ./multilink]
    #[arg(long, value_name = "DIR")]
    pub multilink: Option<PathBuf>,

    /// Scaled variations per primitive [default: 10]
    #[arg(long)]
    pub num_raw_meshes: Option<usize>,

    /// Robot instances to generate [default: 40]
    #[arg(long)]
    pub num_urdfs: Option<usize>,

    /// Put every instance in the test split
    #[arg(long, conflicts_with = "train_fraction")]
    pub all_test: bool,

    /// Shortest chain [default: 2]
    #[arg(long)]
    pub min_links: Option<usize>,

    /// Longest chain [default: 3]
    #[arg(long)]
    pub max_links: Option<usize>,

    /// Base RNG seed [default: drawn from OS entropy]
    #[arg(long)]
    pub seed: Option<u64>,

    /// Share of instances assigned to train [default: 0.8]
    #[arg(long)]
    pub train_fraction: Option<f64>,

    /// Keep existing output and continue instance numbering
    #[arg(long)]
    pub append: bool,

    /// JSON file with the per-instance metadata record
    #[arg(long, value_name = "FILE")]
    pub meta_template: Option<PathBuf>,

    /// Parse each written URDF back and check the chain
    #[arg(long)]
    pub verify: bool,

    /// Link inertia model [default: volumetric]
    #[arg(long, value_enum)]
    pub inertia: Option<InertiaArg>,
}

/// `--inertia` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InertiaArg {
    /// Unit-density volume integral over the mesh
    Volumetric,
    /// Solid box over the mesh bounds at the link mass
    BoundingBox,
}

impl From<InertiaArg> for InertiaModel {
    fn from(arg: InertiaArg) -> Self {
        match arg {
            InertiaArg::Volumetric => InertiaModel::Volumetric,
            InertiaArg::BoundingBox => InertiaModel::BoundingBox,
        }
    }
}

impl Cli {
    /// Resolve the dataset options from the config file and flags
    pub fn dataset_config(&self) -> Result<DatasetConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => DatasetConfig::default(),
        };
        self.apply(&mut config)?;
        Ok(config)
    }

    /// Override `config` with every flag that was given
    pub fn apply(&self, config: &mut DatasetConfig) -> Result<(), ConfigError> {
        if let Some(dir) = &self.primitives {
            config.primitives_dir = dir.clone();
        }
        if let Some(dir) = &self.meshes {
            config.meshes_dir = dir.clone();
        }
        if let Some(dir) = &self.multilink {
            config.output_dir = dir.clone();
        }
        if let Some(k) = self.num_raw_meshes {
            config.variations_per_primitive = k;
        }
        if let Some(m) = self.num_urdfs {
            config.num_instances = m;
        }
        if let Some(min) = self.min_links {
            config.min_links = min;
        }
        if let Some(max) = self.max_links {
            config.max_links = max;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        if self.all_test {
            config.split = SplitPolicy::AllTest;
        } else if let Some(train_fraction) = self.train_fraction {
            config.split = SplitPolicy::Ratio { train_fraction };
        }

        if self.append {
            config.output_policy = OutputPolicy::Append;
        }
        if self.verify {
            config.verify = true;
        }
        if let Some(inertia) = self.inertia {
            config.inertia = inertia.into();
        }
        if let Some(path) = &self.meta_template {
            config.meta = load_meta_template(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("multilink-gen").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_flags_keeps_defaults() {
        let config = parse(&[]).dataset_config().unwrap();
        assert_eq!(config, DatasetConfig::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = parse(&[
            "--primitives",
            "in",
            "--multilink",
            "out",
            "--num-raw-meshes",
            "4",
            "--num-urdfs",
            "5",
            "--min-links",
            "2",
            "--max-links",
            "2",
            "--seed",
            "17",
            "--train-fraction",
            "0.6",
            "--append",
            "--verify",
        ])
        .dataset_config()
        .unwrap();

        assert_eq!(config.primitives_dir, PathBuf::from("in"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.meshes_dir, PathBuf::from("./meshes"));
        assert_eq!(config.variations_per_primitive, 4);
        assert_eq!(config.num_instances, 5);
        assert_eq!((config.min_links, config.max_links), (2, 2));
        assert_eq!(config.seed, Some(17));
        assert_eq!(config.split, SplitPolicy::Ratio { train_fraction: 0.6 });
        assert_eq!(config.output_policy, OutputPolicy::Append);
        assert!(config.verify);
    }

    #[test]
    fn test_inertia_flag() {
        let config = parse(&["--inertia", "bounding-box"]).dataset_config().unwrap();
        assert_eq!(config.inertia, InertiaModel::BoundingBox);
        assert_eq!(
            parse(&[]).dataset_config().unwrap().inertia,
            InertiaModel::Volumetric
        );
        assert!(Cli::try_parse_from(["multilink-gen", "--inertia", "convex"]).is_err());
    }

    #[test]
    fn test_all_test_flag() {
        let config = parse(&["--all-test"]).dataset_config().unwrap();
        assert_eq!(config.split, SplitPolicy::AllTest);
    }

    #[test]
    fn test_all_test_conflicts_with_fraction() {
        let result = Cli::try_parse_from(["multilink-gen", "--all-test", "--train-fraction", "0.5"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("gen.ron");
        std::fs::write(
            &path,
            "(num_instances: 100, max_links: 6, split: AllTest, seed: Some(3))",
        )
        .unwrap();

        let config = parse(&["--config", path.to_str().unwrap(), "--num-urdfs", "8"])
            .dataset_config()
            .unwrap();
        assert_eq!(config.num_instances, 8);
        assert_eq!(config.max_links, 6);
        assert_eq!(config.split, SplitPolicy::AllTest);
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn test_meta_template_flag() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("meta.json");
        std::fs::write(&path, r#"{"user_id": "lab", "version": "2"}"#).unwrap();

        let config = parse(&["--meta-template", path.to_str().unwrap()])
            .dataset_config()
            .unwrap();
        assert_eq!(config.meta.user_id, "lab");
        assert_eq!(config.meta.version, "2");
        assert_eq!(config.meta.anno_id, "1234");
    }
}
