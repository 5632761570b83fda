//! # Lung Inference (placeholder)
//!
//! **This crate performs no image classification.** It stands in for an X-ray model that does
//! not exist: an uploaded image is checked to really be an image, a fixed sequence of progress
//! steps is reported, and then one of a small set of canned predictions is picked at random.
//!
//! The seam is the [`InferenceStub`] trait, so a real classifier could replace
//! [`CannedInference`] without touching the REST or CLI surfaces.
//!
//! Also provided:
//! - [`AnalysisReport`]: a plain-text report of a prediction, optionally written to disk
//! - [`InferenceConfig`]: step delay and seed, resolved at startup

mod config;
mod image;
mod progress;
mod report;
mod stub;

pub use config::{InferenceConfig, DEFAULT_STEP_DELAY_MS, SEED_ENV, STEP_DELAY_ENV};
pub use image::XrayImage;
pub use progress::{analyse_blocking, AnalysisStep, ANALYSIS_STEPS};
pub use report::AnalysisReport;
pub use stub::{canned_predictions, CannedInference, InferenceStub, Prediction};

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("uploaded image is empty")]
    EmptyImage,
    #[error("unsupported media type {0}: expected an image (.jpg, .png, .jpeg)")]
    UnsupportedMediaType(String),
    #[error("inference stub is unavailable")]
    StubUnavailable,
    #[error("failed to write report {}: {source}", .path.display())]
    ReportWrite {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type InferenceResult<T> = std::result::Result<T, InferenceError>;
