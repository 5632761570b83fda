use crate::image::XrayImage;
use crate::stub::{InferenceStub, Prediction};
use crate::InferenceResult;
use serde::Serialize;
use std::time::Duration;

/// One reported stage of an analysis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AnalysisStep {
    /// Percentage complete once this step is reached.
    pub progress: u8,
    pub message: &'static str,
}

/// The fixed progress sequence shown while an analysis runs.
pub const ANALYSIS_STEPS: [AnalysisStep; 5] = [
    AnalysisStep {
        progress: 20,
        message: "Preprocessing image...",
    },
    AnalysisStep {
        progress: 40,
        message: "Extracting features...",
    },
    AnalysisStep {
        progress: 60,
        message: "Running AI model...",
    },
    AnalysisStep {
        progress: 80,
        message: "Analyzing patterns...",
    },
    AnalysisStep {
        progress: 100,
        message: "Generating results...",
    },
];

/// Walk the progress steps, then ask `stub` for a prediction.
///
/// Each step waits `step_delay` and is then passed to `on_step`, so 20% is reported one delay
/// after the start and the prediction follows the 100% step directly. The calling thread does
/// the sleeping; async callers should run this on a blocking pool.
pub fn analyse_blocking<F>(
    stub: &dyn InferenceStub,
    image: &XrayImage,
    step_delay: Duration,
    mut on_step: F,
) -> InferenceResult<Prediction>
where
    F: FnMut(&AnalysisStep),
{
    tracing::info!(
        image = image.file_name(),
        media_type = image.media_type(),
        size_bytes = image.size_bytes(),
        "analysis started"
    );

    for step in &ANALYSIS_STEPS {
        if !step_delay.is_zero() {
            std::thread::sleep(step_delay);
        }
        tracing::debug!(progress = step.progress, message = step.message, "analysis step");
        on_step(step);
    }

    stub.predict(image)
}
