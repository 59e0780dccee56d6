pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod preprocess;
pub mod decision;
pub mod classifier;
pub mod pipeline;

// Convenience re-exports
pub use error::{Error, Result};
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::{Network, ModelMetadata, InputType};
pub use preprocess::{decode_image, normalize, resize_and_pad, TargetSize, Tensor};
pub use decision::{decide, ClassCatalog, DecisionConfig, PredictionResult, RankedPrediction, Status};
pub use classifier::Classifier;
pub use pipeline::Predictor;
