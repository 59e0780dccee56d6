use serde::{Deserialize, Serialize};

/// Verdict of the confidence gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    LowConfidence,
}

/// One entry of the top-k ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPrediction {
    /// Position in the probability vector.
    #[serde(skip)]
    pub index: usize,
    #[serde(rename = "class")]
    pub label: String,
    /// Display form, one decimal, e.g. `"81.0%"`.
    pub confidence: String,
    /// Confidence in percent.
    pub confidence_value: f64,
}

/// Final answer for one image. Field names match the service's JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_class: String,
    pub confidence_score: String,
    pub confidence_value: f64,
    #[serde(rename = "top_3_predictions")]
    pub top_predictions: Vec<RankedPrediction>,
    pub message: String,
    pub status: Status,
    /// Top-1 index, kept even when the label is withheld for low confidence.
    #[serde(skip)]
    pub predicted_index: usize,
}
