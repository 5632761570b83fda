//! Server configuration, resolved once at startup.

use lung_catalog::constants::CATALOG_DIR_ENV;
use lung_catalog::CatalogConfig;
use lung_inference::{InferenceConfig, SEED_ENV, STEP_DELAY_ENV};
use std::net::SocketAddr;

pub const REST_ADDR_ENV: &str = "LUNG_REST_ADDR";
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

/// Everything a server process needs, gathered from the environment before anything binds.
#[derive(Clone, Debug)]
pub struct AppConfig {
    rest_addr: SocketAddr,
    catalog: CatalogConfig,
    inference: InferenceConfig,
}

impl AppConfig {
    pub fn new(rest_addr: SocketAddr, catalog: CatalogConfig, inference: InferenceConfig) -> Self {
        Self {
            rest_addr,
            catalog,
            inference,
        }
    }

    /// Read `LUNG_REST_ADDR`, `LUNG_CATALOG_DIR`, `LUNG_ANALYSIS_STEP_MS` and
    /// `LUNG_INFERENCE_SEED`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_env_values(
            std::env::var(REST_ADDR_ENV).ok(),
            std::env::var(CATALOG_DIR_ENV).ok(),
            std::env::var(STEP_DELAY_ENV).ok(),
            std::env::var(SEED_ENV).ok(),
        )
    }

    /// Build the configuration from raw variable values.
    ///
    /// # Errors
    ///
    /// Returns an error if the address does not parse, the catalog override is not a usable
    /// directory, or a numeric value is malformed.
    pub fn from_env_values(
        rest_addr: Option<String>,
        catalog_dir: Option<String>,
        step_delay_ms: Option<String>,
        seed: Option<String>,
    ) -> anyhow::Result<Self> {
        let raw_addr = rest_addr
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_REST_ADDR.into());
        let rest_addr: SocketAddr = raw_addr.parse().map_err(|e| {
            anyhow::anyhow!("{REST_ADDR_ENV} is not a socket address ({raw_addr}): {e}")
        })?;

        let catalog = CatalogConfig::from_env_value(catalog_dir)?;
        let inference = InferenceConfig::from_env_values(step_delay_ms, seed)?;

        Ok(Self::new(rest_addr, catalog, inference))
    }

    pub fn rest_addr(&self) -> SocketAddr {
        self.rest_addr
    }

    pub fn catalog(&self) -> &CatalogConfig {
        &self.catalog
    }

    pub fn inference(&self) -> &InferenceConfig {
        &self.inference
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lung_catalog::CatalogSource;
    use std::time::Duration;

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = AppConfig::from_env_values(None, None, None, None).expect("defaults");
        assert_eq!(cfg.rest_addr().to_string(), DEFAULT_REST_ADDR);
        assert_eq!(cfg.catalog().source(), &CatalogSource::Embedded);
        assert_eq!(cfg.inference().step_delay(), Duration::from_millis(800));
        assert_eq!(cfg.inference().seed(), None);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let cfg = AppConfig::from_env_values(
            Some("127.0.0.1:8080".into()),
            Some("".into()),
            Some("10".into()),
            Some("3".into()),
        )
        .expect("valid values");
        assert_eq!(cfg.rest_addr().port(), 8080);
        assert_eq!(cfg.inference().step_delay(), Duration::from_millis(10));
        assert_eq!(cfg.inference().seed(), Some(3));
    }

    #[test]
    fn rejects_bad_address_and_numbers() {
        let err = AppConfig::from_env_values(Some("localhost".into()), None, None, None)
            .expect_err("not a socket address");
        assert!(err.to_string().contains(REST_ADDR_ENV));

        assert!(AppConfig::from_env_values(None, None, Some("soon".into()), None).is_err());
        assert!(AppConfig::from_env_values(None, Some("/no/such/dir".into()), None, None).is_err());
    }
}
