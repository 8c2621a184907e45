//! Output directory handling

use std::path::Path;

use crate::constants::INSTANCE_ID_WIDTH;

use super::DatasetError;
use super::config::OutputPolicy;

/// Zero-padded identifier of the instance with the given index
pub fn instance_id(index: usize) -> String {
    format!("{index:0width$}", width = INSTANCE_ID_WIDTH)
}

/// Make `dir` ready for writing according to `policy`
pub fn prepare_output_dir(dir: &Path, policy: OutputPolicy) -> Result<(), DatasetError> {
    if policy == OutputPolicy::Clean && dir.exists() {
        tracing::info!(dir = %dir.display(), "Removing existing output");
        std::fs::remove_dir_all(dir).map_err(|e| DatasetError::io(dir, e))?;
    }
    std::fs::create_dir_all(dir).map_err(|e| DatasetError::io(dir, e))
}

/// Index following the highest numbered instance directory in `dir`
pub fn next_instance_index(dir: &Path) -> Result<usize, DatasetError> {
    if !dir.exists() {
        return Ok(0);
    }

    let mut next = 0;
    for entry in std::fs::read_dir(dir).map_err(|e| DatasetError::io(dir, e))? {
        let entry = entry.map_err(|e| DatasetError::io(dir, e))?;
        if !entry.path().is_dir() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name.len() == INSTANCE_ID_WIDTH
            && let Ok(index) = name.parse::<usize>()
        {
            next = next.max(index + 1);
        }
    }
    Ok(next)
}
