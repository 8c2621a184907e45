//! Instance metadata records and the split manifest

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::DatasetError;
use super::split::Split;

/// Per-instance annotation record written next to each URDF
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceMeta {
    pub user_id: String,
    pub model_cat: String,
    pub model_id: String,
    pub version: String,
    pub anno_id: String,
    pub time_in_sec: String,
}

impl Default for InstanceMeta {
    fn default() -> Self {
        Self {
            user_id: "sy".to_string(),
            model_cat: "Multilink".to_string(),
            model_id: "3d1914946ded40bcb5c1c7d56b18e569".to_string(),
            version: "1".to_string(),
            anno_id: "1234".to_string(),
            time_in_sec: "1".to_string(),
        }
    }
}

impl InstanceMeta {
    /// Load a metadata template from a JSON file; missing fields keep defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        read_json(path.as_ref())
    }
}

/// Ordered instance identifiers per split
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetManifest {
    pub train: Vec<String>,
    pub val: Vec<String>,
    pub test: Vec<String>,
}

impl DatasetManifest {
    /// Load a manifest written by a previous run
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        read_json(path.as_ref())
    }

    pub fn push(&mut self, split: Split, id: impl Into<String>) {
        let list = match split {
            Split::Train => &mut self.train,
            Split::Val => &mut self.val,
            Split::Test => &mut self.test,
        };
        list.push(id.into());
    }

    pub fn ids(&self, split: Split) -> &[String] {
        match split {
            Split::Train => &self.train,
            Split::Val => &self.val,
            Split::Test => &self.test,
        }
    }

    /// Total number of assigned instances
    pub fn len(&self) -> usize {
        self.train.len() + self.val.len() + self.test.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Split an identifier was assigned to
    pub fn split_of(&self, id: &str) -> Option<Split> {
        Split::ALL
            .iter()
            .copied()
            .find(|&split| self.ids(split).iter().any(|i| i == id))
    }
}

/// Write pretty JSON with 4-space indentation
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), DatasetError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .map_err(|e| DatasetError::Serialize(e.to_string()))?;
    std::fs::write(path, buf).map_err(|e| DatasetError::io(path, e))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, DatasetError> {
    let content = std::fs::read_to_string(path).map_err(|e| DatasetError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| DatasetError::Serialize(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_meta_json_shape() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("meta.json");
        write_json(&path, &InstanceMeta::default()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n    \"user_id\": \"sy\",\n    \"model_cat\": \"Multilink\","));
        assert_eq!(InstanceMeta::load(&path).unwrap(), InstanceMeta::default());
    }

    #[test]
    fn test_meta_template_partial() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("template.json");
        std::fs::write(&path, r#"{"user_id": "lab", "anno_id": "77"}"#).unwrap();
        let meta = InstanceMeta::load(&path).unwrap();
        assert_eq!(meta.user_id, "lab");
        assert_eq!(meta.anno_id, "77");
        assert_eq!(meta.model_cat, "Multilink");
    }

    #[test]
    fn test_manifest_bookkeeping() {
        let mut manifest = DatasetManifest::default();
        manifest.push(Split::Train, "000000");
        manifest.push(Split::Train, "000001");
        manifest.push(Split::Val, "000002");
        manifest.push(Split::Test, "000003");

        assert_eq!(manifest.len(), 4);
        assert_eq!(manifest.ids(Split::Train), ["000000", "000001"]);
        assert_eq!(manifest.split_of("000002"), Some(Split::Val));
        assert_eq!(manifest.split_of("000009"), None);

        let temp = tempdir().unwrap();
        let path = temp.path().join("meta.json");
        write_json(&path, &manifest).unwrap();
        assert_eq!(DatasetManifest::load(&path).unwrap(), manifest);
    }
}
