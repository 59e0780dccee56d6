use crate::decision::catalog::ClassCatalog;
use crate::decision::config::DecisionConfig;
use crate::decision::result::{PredictionResult, RankedPrediction, Status};
use crate::error::{Error, Result};

/// Label for an index the catalog does not know.
pub const UNKNOWN_CLASS_LABEL: &str = "ไม่ทราบโรค";
/// Label reported instead of the top-1 class when confidence is too low.
pub const UNDETERMINED_LABEL: &str = "ไม่สามารถระบุได้";
pub const SUCCESS_MESSAGE: &str = "การวิเคราะห์สำเร็จ";

fn low_confidence_message(threshold_percent: f64) -> String {
    format!(
        "ความมั่นใจในการทำนายต่ำกว่า {}% กรุณาถ่ายรูปใหม่ที่ชัดเจนกว่า",
        format_threshold(threshold_percent)
    )
}

/// Whole numbers keep one decimal (`75.0`), others print as-is (`72.5`).
fn format_threshold(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

fn resolve_label(catalog: &ClassCatalog, index: usize) -> String {
    catalog.label(index).unwrap_or(UNKNOWN_CLASS_LABEL).to_owned()
}

/// Indices sorted by probability, highest first. Equal probabilities keep
/// their original index order, so the first entry is also the lowest-index
/// maximum.
pub fn rank(probabilities: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..probabilities.len()).collect();
    // `sort_by` is stable.
    order.sort_by(|&a, &b| probabilities[b].total_cmp(&probabilities[a]));
    order
}

/// Turns one probability vector into a ranked, threshold-gated verdict.
///
/// `probabilities` must be non-empty and index-aligned with `catalog`;
/// indices without a label resolve to a placeholder instead of failing.
/// `top_k` larger than the vector returns every class.
pub fn decide(
    probabilities: &[f64],
    catalog: &ClassCatalog,
    config: &DecisionConfig,
) -> Result<PredictionResult> {
    if probabilities.is_empty() {
        return Err(Error::EmptyProbabilities);
    }
    config.validate()?;

    let order = rank(probabilities);
    let best = order[0];
    let confidence = probabilities[best] * 100.0;

    let top_predictions = order
        .iter()
        .take(config.top_k)
        .map(|&index| {
            let value = probabilities[index] * 100.0;
            RankedPrediction {
                index,
                label: resolve_label(catalog, index),
                confidence: format_percent(value),
                confidence_value: value,
            }
        })
        .collect();

    let (status, predicted_class, message) = if confidence >= config.threshold_percent {
        (Status::Success, resolve_label(catalog, best), SUCCESS_MESSAGE.to_owned())
    } else {
        (
            Status::LowConfidence,
            UNDETERMINED_LABEL.to_owned(),
            low_confidence_message(config.threshold_percent),
        )
    };

    Ok(PredictionResult {
        predicted_class,
        confidence_score: format_percent(confidence),
        confidence_value: confidence,
        top_predictions,
        message,
        status,
        predicted_index: best,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ClassCatalog {
        ClassCatalog::from_labels(["a", "b", "c", "d", "e"])
    }

    fn indices(result: &PredictionResult) -> Vec<usize> {
        result.top_predictions.iter().map(|p| p.index).collect()
    }

    #[test]
    fn confident_prediction_succeeds() {
        let probs = [0.10, 0.81, 0.05, 0.02, 0.02];
        let result = decide(&probs, &catalog(), &DecisionConfig::default()).unwrap();

        assert_eq!(result.status, Status::Success);
        assert_eq!(result.predicted_class, "b");
        assert_eq!(result.predicted_index, 1);
        assert!((result.confidence_value - 81.0).abs() < 1e-9);
        assert_eq!(result.confidence_score, "81.0%");
        assert_eq!(result.message, SUCCESS_MESSAGE);
        assert_eq!(indices(&result), vec![1, 0, 2]);
        assert_eq!(result.top_predictions[1].label, "a");
        assert_eq!(result.top_predictions[1].confidence, "10.0%");
    }

    #[test]
    fn threshold_is_inclusive() {
        let probs = [0.75, 0.25, 0.0, 0.0, 0.0];
        let result = decide(&probs, &catalog(), &DecisionConfig::default()).unwrap();
        assert_eq!(result.confidence_value, 75.0);
        assert_eq!(result.status, Status::Success);
        assert_eq!(result.predicted_class, "a");
    }

    #[test]
    fn low_confidence_withholds_label() {
        let probs = [0.30, 0.28, 0.20, 0.12, 0.10];
        let result = decide(&probs, &catalog(), &DecisionConfig::default()).unwrap();

        assert_eq!(result.status, Status::LowConfidence);
        assert_eq!(result.predicted_class, UNDETERMINED_LABEL);
        assert_eq!(result.predicted_index, 0);
        assert_eq!(result.confidence_score, "30.0%");
        assert_eq!(
            result.message,
            "ความมั่นใจในการทำนายต่ำกว่า 75.0% กรุณาถ่ายรูปใหม่ที่ชัดเจนกว่า"
        );
        // Ranking still carries real labels.
        assert_eq!(result.top_predictions[0].label, "a");
        assert_eq!(indices(&result), vec![0, 1, 2]);
    }

    #[test]
    fn message_interpolates_configured_threshold() {
        let config = DecisionConfig::new(92.5, 3).unwrap();
        let result = decide(&[0.9, 0.1], &catalog(), &config).unwrap();
        assert!(result.message.contains(" 92.5% "));
    }

    #[test]
    fn ties_resolve_to_lowest_index() {
        let probs = [0.5, 0.5, 0.0, 0.0, 0.0];
        let result = decide(&probs, &catalog(), &DecisionConfig::new(50.0, 3).unwrap()).unwrap();
        assert_eq!(result.predicted_index, 0);
        assert_eq!(result.predicted_class, "a");
        assert_eq!(indices(&result), vec![0, 1, 2]);
    }

    #[test]
    fn ranking_is_stable_among_equal_values() {
        assert_eq!(rank(&[0.1, 0.3, 0.1, 0.3, 0.2]), vec![1, 3, 4, 0, 2]);
    }

    #[test]
    fn unknown_index_gets_placeholder_only_for_that_entry() {
        let sparse = ClassCatalog::from_json_str(r#"{"0": "a", "2": "c"}"#).unwrap();
        let probs = [0.2, 0.5, 0.3];
        let result = decide(&probs, &sparse, &DecisionConfig::new(10.0, 3).unwrap()).unwrap();

        assert_eq!(result.status, Status::Success);
        assert_eq!(result.predicted_class, UNKNOWN_CLASS_LABEL);
        let labels: Vec<&str> = result.top_predictions.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec![UNKNOWN_CLASS_LABEL, "c", "a"]);
    }

    #[test]
    fn top_k_larger_than_vector_returns_everything() {
        let result = decide(&[0.6, 0.4], &catalog(), &DecisionConfig::new(75.0, 10).unwrap()).unwrap();
        assert_eq!(result.top_predictions.len(), 2);
    }

    #[test]
    fn top_k_limits_ranking() {
        let probs = [0.1, 0.2, 0.3, 0.4];
        let result = decide(&probs, &catalog(), &DecisionConfig::new(75.0, 1).unwrap()).unwrap();
        assert_eq!(indices(&result), vec![3]);
    }

    #[test]
    fn empty_vector_is_rejected() {
        let err = decide(&[], &catalog(), &DecisionConfig::default()).unwrap_err();
        assert!(matches!(err, Error::EmptyProbabilities));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = DecisionConfig { threshold_percent: 75.0, top_k: 0 };
        assert!(matches!(decide(&[1.0], &catalog(), &config), Err(Error::InvalidTopK)));
    }

    #[test]
    fn serializes_with_service_field_names() {
        let result = decide(&[0.10, 0.81, 0.05], &catalog(), &DecisionConfig::default()).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["predicted_class"], "b");
        assert_eq!(json["confidence_score"], "81.0%");
        assert_eq!(json["top_3_predictions"][0]["class"], "b");
        assert_eq!(json["top_3_predictions"][0]["confidence"], "81.0%");
        assert!(json["top_3_predictions"][0].get("index").is_none());
        assert!(json.get("predicted_index").is_none());
    }

    #[test]
    fn threshold_formatting() {
        assert_eq!(format_threshold(75.0), "75.0");
        assert_eq!(format_threshold(72.5), "72.5");
        assert_eq!(format_threshold(0.0), "0.0");
    }
}
