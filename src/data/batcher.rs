// ============================================================
// Layer 4 — Sequence Batcher
// ============================================================
// Stacks SequenceWindows into one [batch, seq_len, features]
// tensor on the batcher's device.
//
//   window 0: [[s0f0, s0f1], [s1f0, s1f1], ...]
//   window 1: ...
//      → flat [w0s0f0, w0s0f1, w0s1f0, ..., wNsTfF]
//      → TensorData with shape [N, T, F]
//
// The tensor is created directly on the target device, so the
// model's zero state (built on `x.device()`) lands there too.

use burn::{prelude::*, tensor::TensorData};

use crate::data::sequence::{common_shape, SequenceError, SequenceWindow};

#[derive(Clone, Debug)]
pub struct SequenceBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> SequenceBatcher<B> {
    /// Create a batcher that builds tensors on `device`.
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }

    /// Stack `windows` into [batch, seq_len, features].
    ///
    /// Steps:
    ///   1. Validate every window and find the shared [seq_len, features]
    ///   2. Check the feature width against the model's `input_dim`
    ///   3. Flatten window → step → feature into one Vec<f32>
    ///   4. Wrap it in TensorData with the 3-D shape and upload it
    pub fn batch(
        &self,
        windows:   &[SequenceWindow],
        input_dim: usize,
    ) -> Result<Tensor<B, 3>, SequenceError> {
        let [seq_len, features] = common_shape(windows)?;
        if features != input_dim {
            return Err(SequenceError::FeatureWidth { expected: input_dim, found: features });
        }

        let flat: Vec<f32> = windows
            .iter()
            .flat_map(|w| w.steps.iter().flatten().copied())
            .collect();

        let data = TensorData::new(flat, [windows.len(), seq_len, features]);
        Ok(Tensor::from_data(data, &self.device))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    #[test]
    fn test_batch_preserves_layout() {
        let windows = vec![
            SequenceWindow::new(None, vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]),
            SequenceWindow::new(None, vec![vec![7.0, 8.0], vec![9.0, 10.0], vec![11.0, 12.0]]),
        ];
        let batcher = SequenceBatcher::<NdArray>::new(Default::default());
        let tensor  = batcher.batch(&windows, 2).unwrap();

        assert_eq!(tensor.dims(), [2, 3, 2]);
        // window 1, step 2, feature 0
        let v = tensor.slice([1..2, 2..3, 0..1]).into_scalar();
        assert_eq!(v, 11.0);
    }

    #[test]
    fn test_feature_width_checked() {
        let windows = vec![SequenceWindow::new(None, vec![vec![1.0, 2.0, 3.0]])];
        let batcher = SequenceBatcher::<NdArray>::new(Default::default());
        assert_eq!(
            batcher.batch(&windows, 4).unwrap_err(),
            SequenceError::FeatureWidth { expected: 4, found: 3 }
        );
    }

    #[test]
    fn test_empty_batch_rejected() {
        let batcher = SequenceBatcher::<NdArray>::new(Default::default());
        assert_eq!(batcher.batch(&[], 4).unwrap_err(), SequenceError::Empty);
    }
}
