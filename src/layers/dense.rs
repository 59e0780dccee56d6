use serde::{Serialize, Deserialize};

use crate::{math::matrix::Matrix, activation::activation::ActivationFunction};

/// One fully connected layer: `a = σ(x · W + b)`.
///
/// `weights` is `input_size × size`, `biases` is `1 × size`. Files written by
/// the training tool also carry activation caches; those are ignored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer{
    pub size: usize,
    pub weights: Matrix,
    pub biases: Matrix,
    pub activator: ActivationFunction
}

impl Layer {
    pub fn from_parts(weights: Matrix, biases: Matrix, activation: ActivationFunction) -> Layer {
        Layer {
            size: weights.cols,
            weights,
            biases,
            activator: activation
        }
    }

    /// Number of values this layer consumes.
    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    /// Returns a description of the first shape inconsistency, if any.
    pub fn shape_error(&self) -> Option<String> {
        if !self.weights.is_consistent() || !self.biases.is_consistent() {
            return Some("ragged weight or bias rows".to_owned());
        }
        if self.weights.cols != self.size {
            return Some(format!("weights have {} columns, layer size is {}", self.weights.cols, self.size));
        }
        if self.biases.rows != 1 || self.biases.cols != self.size {
            return Some(format!(
                "biases are {}x{}, expected 1x{}",
                self.biases.rows, self.biases.cols, self.size
            ));
        }
        None
    }

    /// Forward pass for a single sample. The caller guarantees
    /// `input.len() == self.input_size()`.
    pub fn forward(&self, input: Vec<f64>) -> Vec<f64> {
        let z = &(&Matrix::row(input) * &self.weights) + &self.biases;
        self.activator.apply(z.into_row())
    }
}
