use crate::error::{Error, Result};
use crate::network::network::Network;
use crate::preprocess::{TargetSize, Tensor};

/// Opaque inference step: one normalized image tensor in, one probability
/// per class out.
///
/// Implementations are loaded once at startup and shared read-only across
/// request threads, hence `Send + Sync` and `&self`.
pub trait Classifier: Send + Sync {
    /// Image size the model was trained on, when it declares one.
    fn input_size(&self) -> Option<TargetSize>;

    /// Length of the probability vector `predict` returns.
    fn class_count(&self) -> usize;

    fn predict(&self, tensor: &Tensor) -> Result<Vec<f64>>;
}

impl Classifier for Network {
    fn input_size(&self) -> Option<TargetSize> {
        self.image_input()
    }

    fn class_count(&self) -> usize {
        self.output_len()
    }

    /// Flattens the NHWC tensor row-major (y, x, channel) into the first
    /// layer's input and runs the forward pass.
    fn predict(&self, tensor: &Tensor) -> Result<Vec<f64>> {
        if tensor.shape()[0] != 1 {
            return Err(Error::Classifier(format!(
                "expected a single-image batch, got {}",
                tensor.shape()[0]
            )));
        }
        let input: Vec<f64> = tensor.iter().map(|&v| v as f64).collect();
        self.forward(input)
    }
}
