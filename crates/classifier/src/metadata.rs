use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Sidecar describing a trained artifact: class label order and the input
/// size the network was built for. Written by the trainer, read by the
/// burn inference backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub class_names: Vec<String>,
    pub input_size: u32,
}

impl ModelMetadata {
    /// Path of the metadata sidecar for a given artifact path.
    pub fn sidecar_path(artifact: &Path) -> PathBuf {
        artifact.with_extension("json")
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write model metadata to {}", path.display()))?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read model metadata from {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Invalid model metadata in {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidecar_path_swaps_extension() {
        let path = ModelMetadata::sidecar_path(Path::new("models/fire.mpk"));
        assert_eq!(path, PathBuf::from("models/fire.json"));
    }

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fire.json");

        let metadata = ModelMetadata {
            class_names: vec!["fire".to_string(), "normal".to_string()],
            input_size: 224,
        };
        metadata.save(&path).unwrap();

        let loaded = ModelMetadata::load(&path).unwrap();
        assert_eq!(loaded.class_names, metadata.class_names);
        assert_eq!(loaded.input_size, 224);
    }
}
