use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("No sequence windows to process")]
    Empty,

    #[error("Window {window} has no time steps")]
    NoSteps { window: usize },

    #[error("Window {window} is ragged: step {step} has {found} features, expected {expected}")]
    Ragged { window: usize, step: usize, expected: usize, found: usize },

    #[error("Window {window} has shape [{found_len}, {found_dim}], expected [{expected_len}, {expected_dim}]")]
    ShapeDiffers {
        window:       usize,
        expected_len: usize,
        expected_dim: usize,
        found_len:    usize,
        found_dim:    usize,
    },

    #[error("Feature width {found} does not match the model's input_dim {expected}")]
    FeatureWidth { expected: usize, found: usize },
}

/// One featurised observation window: `steps[t][f]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceWindow {
    /// Where the observations came from, carried through to the report.
    #[serde(default)]
    pub region: Option<String>,

    pub steps: Vec<Vec<f32>>,
}

impl SequenceWindow {
    pub fn new(region: Option<String>, steps: Vec<Vec<f32>>) -> Self {
        Self { region, steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn feature_dim(&self) -> usize {
        self.steps.first().map_or(0, Vec::len)
    }

    /// Checks the window is non-empty and rectangular.
    /// `index` is only used to label the error.
    pub fn validate(&self, index: usize) -> Result<(), SequenceError> {
        if self.steps.is_empty() {
            return Err(SequenceError::NoSteps { window: index });
        }
        let expected = self.feature_dim();
        for (step, row) in self.steps.iter().enumerate() {
            if row.len() != expected || expected == 0 {
                return Err(SequenceError::Ragged { window: index, step, expected, found: row.len() });
            }
        }
        Ok(())
    }
}

/// On-disk layout: `{ "windows": [ { "region": "...", "steps": [[...], ...] }, ... ] }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SequenceFile {
    pub windows: Vec<SequenceWindow>,
}

/// Validates every window and returns the shared `[seq_len, feature_dim]`.
pub fn common_shape(windows: &[SequenceWindow]) -> Result<[usize; 2], SequenceError> {
    let first = windows.first().ok_or(SequenceError::Empty)?;
    first.validate(0)?;
    let shape = [first.len(), first.feature_dim()];

    for (i, w) in windows.iter().enumerate().skip(1) {
        w.validate(i)?;
        if [w.len(), w.feature_dim()] != shape {
            return Err(SequenceError::ShapeDiffers {
                window:       i,
                expected_len: shape[0],
                expected_dim: shape[1],
                found_len:    w.len(),
                found_dim:    w.feature_dim(),
            });
        }
    }
    Ok(shape)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn window(t: usize, f: usize) -> SequenceWindow {
        SequenceWindow::new(None, vec![vec![0.5; f]; t])
    }

    #[test]
    fn test_common_shape() {
        let ws = vec![window(5, 3), window(5, 3)];
        assert_eq!(common_shape(&ws).unwrap(), [5, 3]);
    }

    #[test]
    fn test_empty_batch_rejected() {
        assert_eq!(common_shape(&[]).unwrap_err(), SequenceError::Empty);
    }

    #[test]
    fn test_window_without_steps_rejected() {
        let ws = vec![window(2, 3), window(0, 3)];
        assert_eq!(common_shape(&ws).unwrap_err(), SequenceError::NoSteps { window: 1 });
    }

    #[test]
    fn test_ragged_window_rejected() {
        let w = SequenceWindow::new(None, vec![vec![1.0, 2.0], vec![1.0]]);
        assert_eq!(
            w.validate(0).unwrap_err(),
            SequenceError::Ragged { window: 0, step: 1, expected: 2, found: 1 }
        );
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let ws = vec![window(4, 3), window(5, 3)];
        assert!(matches!(common_shape(&ws), Err(SequenceError::ShapeDiffers { window: 1, .. })));
    }

    #[test]
    fn test_parse_file_with_optional_region() {
        let json = r#"{"windows":[
            {"region":"North Coast","steps":[[0.1,0.2],[0.3,0.4]]},
            {"steps":[[0.5,0.6],[0.7,0.8]]}
        ]}"#;
        let file: SequenceFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.windows[0].region.as_deref(), Some("North Coast"));
        assert_eq!(file.windows[1].region, None);
        assert_eq!(common_shape(&file.windows).unwrap(), [2, 2]);
    }
}
