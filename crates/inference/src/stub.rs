//! The placeholder classifier.

use crate::image::XrayImage;
use crate::{InferenceError, InferenceResult};
use lung_catalog::Severity;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// A predicted condition for one image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Human label of the predicted condition.
    pub disease: String,
    /// Confidence as a percentage (0-100).
    pub confidence: f32,
    pub severity: Severity,
    pub recommendations: Vec<String>,
}

/// Anything that can turn an X-ray into a [`Prediction`].
pub trait InferenceStub: Send + Sync {
    fn predict(&self, image: &XrayImage) -> InferenceResult<Prediction>;
}

/// The fixed set of predictions the placeholder chooses from.
pub fn canned_predictions() -> Vec<Prediction> {
    fn prediction(
        disease: &str,
        confidence: f32,
        severity: Severity,
        recommendations: [&str; 3],
    ) -> Prediction {
        Prediction {
            disease: disease.to_owned(),
            confidence,
            severity,
            recommendations: recommendations.iter().map(|r| r.to_string()).collect(),
        }
    }

    vec![
        prediction(
            "Healthy",
            92.5,
            Severity::Healthy,
            [
                "Continue maintaining healthy lifestyle habits",
                "Regular exercise to strengthen respiratory system",
                "Annual health check-ups recommended",
            ],
        ),
        prediction(
            "Viral Pneumonia",
            87.3,
            Severity::Warning,
            [
                "Consult healthcare provider for proper diagnosis",
                "Rest and increase fluid intake",
                "Monitor symptoms closely",
            ],
        ),
        prediction(
            "Bacterial Pneumonia",
            94.1,
            Severity::Critical,
            [
                "Seek immediate medical attention",
                "Antibiotic treatment likely required",
                "Hospital evaluation recommended",
            ],
        ),
    ]
}

/// Mock inference: ignores the image content and returns a uniformly random canned prediction.
///
/// Not a classifier. The image is only used for logging.
pub struct CannedInference {
    predictions: Vec<Prediction>,
    rng: Mutex<StdRng>,
}

impl CannedInference {
    /// A stub over `predictions`, seeded from `seed` or from OS entropy.
    ///
    /// # Errors
    ///
    /// Returns `InferenceError::InvalidInput` if `predictions` is empty.
    pub fn new(predictions: Vec<Prediction>, seed: Option<u64>) -> InferenceResult<Self> {
        if predictions.is_empty() {
            return Err(InferenceError::InvalidInput(
                "canned prediction set cannot be empty".into(),
            ));
        }

        Ok(Self {
            predictions,
            rng: Mutex::new(seeded_rng(seed)),
        })
    }

    /// The standard canned set with an optional seed.
    pub fn standard(seed: Option<u64>) -> Self {
        Self {
            predictions: canned_predictions(),
            rng: Mutex::new(seeded_rng(seed)),
        }
    }

    pub fn predictions(&self) -> &[Prediction] {
        &self.predictions
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

impl InferenceStub for CannedInference {
    fn predict(&self, image: &XrayImage) -> InferenceResult<Prediction> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| InferenceError::StubUnavailable)?;

        let picked = self
            .predictions
            .choose(&mut *rng)
            .cloned()
            .ok_or(InferenceError::StubUnavailable)?;

        tracing::info!(
            image = image.file_name(),
            disease = %picked.disease,
            confidence = picked.confidence,
            "mock prediction selected"
        );
        Ok(picked)
    }
}
