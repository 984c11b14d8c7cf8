// ============================================================
// Layer 5 — Sequence Risk Model
// ============================================================
// Stacked LSTM encoder + feed-forward risk head.
//
//   x  [batch, seq_len, input_dim]
//    │
//    ▼
//   LSTM layer 0 ─ dropout ─ LSTM layer 1 ─ ... ─ LSTM layer N-1
//    │                (zero h0 / c0 for every layer, every call)
//    ▼
//   last time step  [batch, hidden_dim]
//    │
//    ▼
//   expand (hidden_dim → hidden_dim/2) → ReLU
//   project (hidden_dim/2 → output_dim) → Sigmoid
//    │
//    ▼
//   risk  [batch, output_dim], every entry in (0, 1)
//
// Dropout follows Burn's convention: it only fires when the
// backend is an autodiff backend. Calling `.valid()` on a
// training model yields the inference-mode model.

use burn::{
    nn::{
        Dropout, DropoutConfig,
        Linear, LinearConfig,
        Lstm, LstmConfig, LstmState,
    },
    prelude::*,
    tensor::activation::{relu, sigmoid},
};

use crate::ml::error::{RiskModelError, RiskModelResult};

#[derive(Config, Debug)]
pub struct RiskLstmConfig {
    pub input_dim:  usize,
    pub hidden_dim: usize,
    pub num_layers: usize,
    pub output_dim: usize,
    /// Inter-layer dropout, only applied between stacked LSTM layers.
    #[config(default = 0.2)]
    pub dropout:    f64,
}

impl RiskLstmConfig {
    /// Width of the head's hidden layer (rounds down for odd hidden_dim).
    pub fn head_dim(&self) -> usize {
        self.hidden_dim / 2
    }

    pub fn validate(&self) -> RiskModelResult<()> {
        if self.input_dim == 0 {
            return Err(RiskModelError::invalid("input_dim", "must be > 0"));
        }
        if self.hidden_dim == 0 {
            return Err(RiskModelError::invalid("hidden_dim", "must be > 0"));
        }
        if self.head_dim() == 0 {
            return Err(RiskModelError::invalid(
                "hidden_dim",
                format!("must be >= 2 so the head width hidden_dim/2 is > 0 (got {})", self.hidden_dim),
            ));
        }
        if self.num_layers == 0 {
            return Err(RiskModelError::invalid("num_layers", "must be >= 1"));
        }
        if self.output_dim == 0 {
            return Err(RiskModelError::invalid("output_dim", "must be > 0"));
        }
        if !(0.0..1.0).contains(&self.dropout) {
            return Err(RiskModelError::invalid(
                "dropout",
                format!("must be in [0, 1) (got {})", self.dropout),
            ));
        }
        Ok(())
    }

    pub fn try_init<B: Backend>(&self, device: &B::Device) -> RiskModelResult<RiskLstm<B>> {
        self.validate()?;

        let layers: Vec<Lstm<B>> = (0..self.num_layers)
            .map(|i| {
                let d_input = if i == 0 { self.input_dim } else { self.hidden_dim };
                LstmConfig::new(d_input, self.hidden_dim, true).init(device)
            })
            .collect();

        let head = RiskHead {
            expand:  LinearConfig::new(self.hidden_dim, self.head_dim()).init(device),
            project: LinearConfig::new(self.head_dim(), self.output_dim).init(device),
        };

        Ok(RiskLstm {
            layers,
            dropout:    DropoutConfig::new(self.dropout).init(),
            head,
            input_dim:  self.input_dim,
            hidden_dim: self.hidden_dim,
            output_dim: self.output_dim,
        })
    }
}

/// linear → ReLU → linear → sigmoid, in that fixed order.
#[derive(Module, Debug)]
pub struct RiskHead<B: Backend> {
    expand:  Linear<B>,
    project: Linear<B>,
}

impl<B: Backend> RiskHead<B> {
    /// [batch, hidden_dim] → [batch, output_dim]
    pub fn forward(&self, encoded: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = relu(self.expand.forward(encoded));
        sigmoid(self.project.forward(x))
    }
}

#[derive(Module, Debug)]
pub struct RiskLstm<B: Backend> {
    layers:     Vec<Lstm<B>>,
    dropout:    Dropout,
    head:       RiskHead<B>,
    input_dim:  usize,
    hidden_dim: usize,
    output_dim: usize,
}

impl<B: Backend> RiskLstm<B> {
    pub fn input_dim(&self)  -> usize { self.input_dim }
    pub fn hidden_dim(&self) -> usize { self.hidden_dim }
    pub fn num_layers(&self) -> usize { self.layers.len() }
    pub fn output_dim(&self) -> usize { self.output_dim }
    pub fn head_dim(&self)   -> usize { self.hidden_dim / 2 }

    /// x: [batch, seq_len, input_dim] → risk scores [batch, output_dim]
    pub fn forward(&self, x: Tensor<B, 3>) -> RiskModelResult<Tensor<B, 2>> {
        let encoded = self.forward_sequence(x)?;
        let [batch, seq_len, hidden] = encoded.dims();

        // Many-to-one: only the final time step reaches the head.
        let last = encoded
            .slice([0..batch, (seq_len - 1)..seq_len, 0..hidden])
            .reshape([batch, hidden]);

        Ok(self.head.forward(last))
    }

    /// x: [batch, seq_len, input_dim] → top-layer outputs [batch, seq_len, hidden_dim]
    pub fn forward_sequence(&self, x: Tensor<B, 3>) -> RiskModelResult<Tensor<B, 3>> {
        let [batch, _, _] = self.check_input(&x)?;
        let (h0, c0) = self.zero_state(batch, &x.device());

        let top = self.layers.len() - 1;
        let mut out = x;
        for (i, layer) in self.layers.iter().enumerate() {
            let state = LstmState::new(
                self.layer_slice(&c0, i, batch),
                self.layer_slice(&h0, i, batch),
            );
            let (seq, _) = layer.forward(out, Some(state));
            out = if i < top { self.dropout.forward(seq) } else { seq };
        }
        Ok(out)
    }

    fn check_input(&self, x: &Tensor<B, 3>) -> RiskModelResult<[usize; 3]> {
        let dims = x.dims();
        let [batch, seq_len, features] = dims;
        if batch == 0 || seq_len == 0 || features != self.input_dim {
            return Err(RiskModelError::ShapeMismatch {
                expected: format!("[batch >= 1, seq_len >= 1, {}]", self.input_dim),
                actual:   dims.to_vec(),
            });
        }
        Ok(dims)
    }

    /// Hidden and cell state, [num_layers, batch, hidden_dim] zeros on the input's device.
    fn zero_state(&self, batch: usize, device: &B::Device) -> (Tensor<B, 3>, Tensor<B, 3>) {
        let shape = [self.layers.len(), batch, self.hidden_dim];
        (Tensor::zeros(shape, device), Tensor::zeros(shape, device))
    }

    fn layer_slice(&self, state: &Tensor<B, 3>, layer: usize, batch: usize) -> Tensor<B, 2> {
        state
            .clone()
            .slice([layer..layer + 1, 0..batch, 0..self.hidden_dim])
            .reshape([batch, self.hidden_dim])
    }
}
