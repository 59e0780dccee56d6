use std::path::PathBuf;

/// Errors raised by the classification pipeline and its collaborators.
///
/// Below-threshold confidence and catalog gaps are *not* errors; they are
/// ordinary outcomes carried by `PredictionResult`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("target size must be positive, got {width}x{height}")]
    InvalidTargetSize { width: u32, height: u32 },

    #[error("source image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("probability vector is empty")]
    EmptyProbabilities,

    #[error("top_k must be at least 1")]
    InvalidTopK,

    #[error("confidence threshold must be a percentage in [0, 100], got {0}")]
    InvalidThreshold(f64),

    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("classifier failed: {0}")]
    Classifier(String),

    #[error("could not load model '{}': {reason}", .path.display())]
    ModelLoad { path: PathBuf, reason: String },

    #[error("invalid class catalog: {0}")]
    Catalog(String),

    #[error("invalid image URL: {0}")]
    InvalidUrl(String),

    #[error("{0}")]
    Fetch(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
