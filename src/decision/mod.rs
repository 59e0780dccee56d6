//! Probability vector → ranked, confidence-gated verdict.

pub mod catalog;
pub mod config;
pub mod decide;
pub mod result;

pub use catalog::ClassCatalog;
pub use config::DecisionConfig;
pub use decide::{decide, rank};
pub use result::{PredictionResult, RankedPrediction, Status};
