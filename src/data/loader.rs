// ============================================================
// Layer 4 — Sequence Loader
// ============================================================
// Reads featurised observation windows from a JSON file.
//
// The file holds windows that an upstream feature pipeline
// already produced — sensor readings, weather indices, etc.
// flattened into one vector per time step:
//
//   {
//     "windows": [
//       { "region": "North Coast", "steps": [[f0, f1, ...], ...] },
//       ...
//     ]
//   }
//
// Every window must have the same number of steps and the
// same feature width, because they are stacked into a single
// [batch, seq_len, features] tensor downstream.

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::data::sequence::{common_shape, SequenceFile, SequenceWindow};
use crate::domain::traits::SequenceSource;

pub struct JsonSequenceLoader {
    path: PathBuf,
}

impl JsonSequenceLoader {
    /// Point the loader at a JSON sequence file. Nothing is read until `load_all`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SequenceSource for JsonSequenceLoader {
    fn load_all(&self) -> Result<Vec<SequenceWindow>> {
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read sequence file '{}'", self.path.display()))?;

        let file: SequenceFile = serde_json::from_str(&json)
            .with_context(|| format!("'{}' is not a valid sequence file", self.path.display()))?;

        let [seq_len, features] = common_shape(&file.windows)
            .with_context(|| format!("Invalid windows in '{}'", self.path.display()))?;

        tracing::info!(
            "Loaded {} windows ({} steps x {} features) from '{}'",
            file.windows.len(), seq_len, features, self.path.display()
        );
        Ok(file.windows)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_valid_file() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("windows.json");
        fs::write(&path, r#"{"windows":[{"region":"Central Valley","steps":[[1.0,2.0,3.0]]}]}"#).unwrap();

        let windows = JsonSequenceLoader::new(&path).load_all().unwrap();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].feature_dim(), 3);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonSequenceLoader::new(dir.path().join("nope.json")).load_all().unwrap_err();
        assert!(err.to_string().contains("Cannot read sequence file"));
    }

    #[test]
    fn test_ragged_file_is_an_error() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("ragged.json");
        fs::write(&path, r#"{"windows":[{"steps":[[1.0,2.0],[3.0]]}]}"#).unwrap();
        assert!(JsonSequenceLoader::new(&path).load_all().is_err());
    }
}
