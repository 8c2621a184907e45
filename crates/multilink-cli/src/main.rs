//! Multilink dataset generator entry point

mod cli;
mod config;

use anyhow::{Context, Result};
use clap::Parser;
use multilink_core::DatasetGenerator;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "multilink_gen=info,multilink_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = cli
        .dataset_config()
        .context("Failed to resolve generator configuration")?;

    tracing::info!(
        primitives = %config.primitives_dir.display(),
        output = %config.output_dir.display(),
        instances = config.num_instances,
        "Starting multilink generator"
    );

    let summary = DatasetGenerator::new(config)
        .run()
        .context("Dataset generation failed")?;

    tracing::info!(
        seed = summary.base_seed,
        pool = summary.pool_size,
        generated = summary.instances.len(),
        total = summary.manifest.len(),
        "Done"
    );
    Ok(())
}
