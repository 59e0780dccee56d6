use std::sync::Arc;

use image::DynamicImage;

use crate::classifier::Classifier;
use crate::decision::{decide, ClassCatalog, DecisionConfig, PredictionResult, Status};
use crate::error::{Error, Result};
use crate::preprocess::{decode_image, normalize, TargetSize};

/// Normalize → classify → decide, with every collaborator injected.
///
/// Holds no per-request state; one instance is shared by all request
/// threads.
#[derive(Clone)]
pub struct Predictor {
    classifier: Arc<dyn Classifier>,
    catalog: Arc<ClassCatalog>,
    target: TargetSize,
    decision: DecisionConfig,
}

impl Predictor {
    pub fn new(
        classifier: Arc<dyn Classifier>,
        catalog: Arc<ClassCatalog>,
        target: TargetSize,
        decision: DecisionConfig,
    ) -> Result<Self> {
        target.validate()?;
        decision.validate()?;
        if let Some(declared) = classifier.input_size() {
            if declared != target {
                log::warn!(
                    "classifier declares a {}x{} input but images are normalized to {}x{}",
                    declared.width, declared.height, target.width, target.height
                );
            }
        }
        let missing = catalog.missing(classifier.class_count());
        if !missing.is_empty() {
            log::warn!("class catalog has no label for indices {:?}", missing);
        }
        Ok(Predictor { classifier, catalog, target, decision })
    }

    pub fn predict_image(&self, image: &DynamicImage) -> Result<PredictionResult> {
        let tensor = normalize(image, self.target)?;
        let probabilities = self.classifier.predict(&tensor)?;
        log::info!("Model prediction completed");
        if probabilities.is_empty() {
            return Err(Error::EmptyProbabilities);
        }

        let result = decide(&probabilities, &self.catalog, &self.decision)?;
        match result.status {
            Status::Success => log::info!(
                "Prediction successful: {} with {:.1}% confidence",
                result.predicted_class, result.confidence_value
            ),
            Status::LowConfidence => log::info!(
                "Low confidence prediction: {:.1}%",
                result.confidence_value
            ),
        }
        Ok(result)
    }

    pub fn predict_bytes(&self, bytes: &[u8]) -> Result<PredictionResult> {
        let image = decode_image(bytes)?;
        self.predict_image(&image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocess::Tensor;
    use std::sync::Mutex;

    /// Returns a canned vector and records the shape it was called with.
    struct Canned {
        output: Vec<f64>,
        seen: Mutex<Vec<Vec<usize>>>,
    }

    impl Classifier for Canned {
        fn input_size(&self) -> Option<TargetSize> {
            None
        }
        fn class_count(&self) -> usize {
            self.output.len()
        }
        fn predict(&self, tensor: &Tensor) -> Result<Vec<f64>> {
            self.seen.lock().unwrap().push(tensor.shape().to_vec());
            Ok(self.output.clone())
        }
    }

    fn predictor(output: Vec<f64>) -> (Predictor, Arc<Canned>) {
        let canned = Arc::new(Canned { output, seen: Mutex::new(Vec::new()) });
        let predictor = Predictor::new(
            canned.clone(),
            Arc::new(ClassCatalog::rice_diseases()),
            TargetSize::default(),
            DecisionConfig::default(),
        )
        .unwrap();
        (predictor, canned)
    }

    #[test]
    fn runs_the_full_chain() {
        let (predictor, canned) = predictor(vec![0.02, 0.03, 0.9, 0.03, 0.02]);
        let result = predictor.predict_image(&DynamicImage::new_rgb8(640, 480)).unwrap();
        assert_eq!(result.status, Status::Success);
        assert_eq!(result.predicted_class, "โรคไหม้ (Rice Blast)");
        assert_eq!(canned.seen.lock().unwrap()[0], vec![1, 256, 256, 3]);
    }

    #[test]
    fn empty_output_is_an_error() {
        let (predictor, _) = predictor(vec![]);
        let err = predictor.predict_image(&DynamicImage::new_rgb8(4, 4)).unwrap_err();
        assert!(matches!(err, Error::EmptyProbabilities));
    }

    #[test]
    fn undecodable_bytes_fail_before_inference() {
        let (predictor, canned) = predictor(vec![1.0]);
        assert!(matches!(predictor.predict_bytes(b"nope"), Err(Error::Decode(_))));
        assert!(canned.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn rejects_bad_configuration() {
        let canned = Arc::new(Canned { output: vec![1.0], seen: Mutex::new(Vec::new()) });
        let result = Predictor::new(
            canned,
            Arc::new(ClassCatalog::default()),
            TargetSize::new(256, 0),
            DecisionConfig::default(),
        );
        assert!(matches!(result, Err(Error::InvalidTargetSize { .. })));
    }
}
