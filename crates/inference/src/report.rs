//! Plain-text analysis reports.

use crate::stub::Prediction;
use crate::{InferenceError, InferenceResult};
use chrono::{DateTime, Utc};
use lung_catalog::Facet;
use serde::Serialize;
use std::path::{Path, PathBuf};

const REPORT_FILE_PREFIX: &str = "lung-analysis-report";
const DISCLAIMER: &str = "This result is produced by a placeholder model and is not a diagnosis. \
Consult a qualified healthcare professional.";

/// A prediction bound to the image it was made for and the time it was produced.
#[derive(Clone, Debug, Serialize)]
pub struct AnalysisReport {
    pub image_name: String,
    pub prediction: Prediction,
    pub generated_at: DateTime<Utc>,
}

impl AnalysisReport {
    pub fn new(image_name: impl Into<String>, prediction: Prediction) -> Self {
        Self::with_timestamp(image_name, prediction, Utc::now())
    }

    pub fn with_timestamp(
        image_name: impl Into<String>,
        prediction: Prediction,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            image_name: image_name.into(),
            prediction,
            generated_at,
        }
    }

    /// Render the report as plain text.
    pub fn render(&self) -> String {
        let mut output = String::new();
        output.push_str("Lung X-ray Analysis Report\n");
        output.push_str("==========================\n");
        output.push_str(&format!(
            "Generated: {}\n",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        output.push_str(&format!("Image: {}\n", self.image_name));
        output.push('\n');
        output.push_str(&format!("Condition: {}\n", self.prediction.disease));
        output.push_str(&format!("Confidence: {:.1}%\n", self.prediction.confidence));
        output.push_str(&format!("Severity: {}\n", self.prediction.severity.label()));
        output.push('\n');
        output.push_str("Recommendations:\n");
        for (i, recommendation) in self.prediction.recommendations.iter().enumerate() {
            output.push_str(&format!("  {}. {recommendation}\n", i + 1));
        }
        output.push('\n');
        output.push_str(DISCLAIMER);
        output.push('\n');
        output
    }

    /// File name used by [`AnalysisReport::write_to_dir`].
    pub fn file_name(&self) -> String {
        format!(
            "{REPORT_FILE_PREFIX}-{}.txt",
            self.generated_at.format("%Y%m%dT%H%M%SZ")
        )
    }

    /// Write the rendered report into `dir`, returning the path written.
    ///
    /// # Errors
    ///
    /// Returns `InferenceError::ReportWrite` if `dir` cannot be created or the file cannot be
    /// written.
    pub fn write_to_dir(&self, dir: &Path) -> InferenceResult<PathBuf> {
        let path = dir.join(self.file_name());

        std::fs::create_dir_all(dir).map_err(|source| InferenceError::ReportWrite {
            path: dir.to_path_buf(),
            source,
        })?;
        std::fs::write(&path, self.render()).map_err(|source| InferenceError::ReportWrite {
            path: path.clone(),
            source,
        })?;

        tracing::info!(path = %path.display(), "analysis report written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canned_predictions;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn fixed_report() -> AnalysisReport {
        let generated_at = Utc
            .with_ymd_and_hms(2024, 3, 9, 14, 5, 7)
            .single()
            .expect("valid timestamp");
        AnalysisReport::with_timestamp("chest.png", canned_predictions().remove(1), generated_at)
    }

    #[test]
    fn render_includes_prediction_details() {
        let text = fixed_report().render();

        assert!(text.starts_with("Lung X-ray Analysis Report\n"));
        assert!(text.contains("Generated: 2024-03-09 14:05:07 UTC"));
        assert!(text.contains("Image: chest.png"));
        assert!(text.contains("Condition: Viral Pneumonia"));
        assert!(text.contains("Confidence: 87.3%"));
        assert!(text.contains("Severity: Moderate"));
        assert!(text.contains("  1. Consult healthcare provider for proper diagnosis"));
        assert!(text.contains("  3. Monitor symptoms closely"));
        assert!(text.contains("not a diagnosis"));
        assert!(text.contains("Severity: Moderate\n\nRecommendations:\n"));
        assert!(text.ends_with("healthcare professional.\n"));
    }

    #[test]
    fn file_name_uses_compact_utc_timestamp() {
        assert_eq!(
            fixed_report().file_name(),
            "lung-analysis-report-20240309T140507Z.txt"
        );
    }

    #[test]
    fn write_to_dir_creates_missing_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let dir = temp_dir.path().join("reports").join("nested");
        let report = fixed_report();

        let path = report.write_to_dir(&dir).expect("write report");

        assert_eq!(path, dir.join(report.file_name()));
        let written = std::fs::read_to_string(&path).expect("read report");
        assert_eq!(written, report.render());
    }

    #[test]
    fn write_to_dir_fails_when_target_is_a_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "x").expect("write blocker");

        let err = fixed_report()
            .write_to_dir(&blocker)
            .expect_err("cannot write under a file");
        assert!(matches!(err, InferenceError::ReportWrite { .. }));
    }
}
