//! Inference configuration.
//!
//! Resolved once at process startup from the raw environment values and then passed in
//! explicitly, so neither the stub nor the handlers read the environment.

use crate::stub::CannedInference;
use crate::{InferenceError, InferenceResult};
use std::time::Duration;

pub const STEP_DELAY_ENV: &str = "LUNG_ANALYSIS_STEP_MS";
pub const SEED_ENV: &str = "LUNG_INFERENCE_SEED";
pub const DEFAULT_STEP_DELAY_MS: u64 = 800;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InferenceConfig {
    step_delay: Duration,
    seed: Option<u64>,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            step_delay: Duration::from_millis(DEFAULT_STEP_DELAY_MS),
            seed: None,
        }
    }
}

impl InferenceConfig {
    pub fn new(step_delay: Duration, seed: Option<u64>) -> Self {
        Self { step_delay, seed }
    }

    pub fn step_delay(&self) -> Duration {
        self.step_delay
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Build the configuration from the raw step-delay and seed variables.
    ///
    /// Missing or blank values fall back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns `InferenceError::InvalidInput` if a value is present but not an unsigned integer.
    pub fn from_env_values(
        step_delay_ms: Option<String>,
        seed: Option<String>,
    ) -> InferenceResult<Self> {
        let step_delay = match parse_u64(STEP_DELAY_ENV, step_delay_ms)? {
            Some(ms) => Duration::from_millis(ms),
            None => Duration::from_millis(DEFAULT_STEP_DELAY_MS),
        };
        let seed = parse_u64(SEED_ENV, seed)?;

        Ok(Self { step_delay, seed })
    }

    /// The canned stub this configuration describes.
    pub fn build_stub(&self) -> CannedInference {
        CannedInference::standard(self.seed)
    }
}

fn parse_u64(name: &str, value: Option<String>) -> InferenceResult<Option<u64>> {
    let Some(raw) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    raw.parse::<u64>().map(Some).map_err(|e| {
        InferenceError::InvalidInput(format!(
            "{name} must be an unsigned integer, got {raw:?}: {e}"
        ))
    })
}
