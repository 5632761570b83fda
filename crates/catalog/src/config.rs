//! Catalog configuration.
//!
//! Resolved once at process startup and then passed into [`crate::Catalog::load`], so request
//! handlers never read environment variables.

use crate::constants::{CATALOG_DIR_ENV, DISEASES_FILE_NAME, REMEDIES_FILE_NAME};
use crate::{CatalogError, CatalogResult};
use std::path::{Path, PathBuf};

/// Where the reference data comes from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CatalogSource {
    /// The YAML compiled into the binary.
    #[default]
    Embedded,
    /// A directory holding `diseases.yaml` and `remedies.yaml`.
    Directory(PathBuf),
}

#[derive(Clone, Debug, Default)]
pub struct CatalogConfig {
    source: CatalogSource,
}

impl CatalogConfig {
    pub fn new(source: CatalogSource) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Build the configuration from the raw value of the directory override variable.
    ///
    /// `None` or a blank value selects the embedded data.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidInput` if an override is given but is not a directory
    /// containing both catalog files.
    pub fn from_env_value(catalog_dir: Option<String>) -> CatalogResult<Self> {
        let dir = catalog_dir
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        match dir {
            None => Ok(Self::default()),
            Some(dir) => {
                validate_catalog_dir(&dir)?;
                Ok(Self::new(CatalogSource::Directory(dir)))
            }
        }
    }
}

/// Check that `dir` looks like a catalog directory.
pub fn validate_catalog_dir(dir: &Path) -> CatalogResult<()> {
    if !dir.is_dir() {
        return Err(CatalogError::InvalidInput(format!(
            "{CATALOG_DIR_ENV} override is not a directory: {}",
            dir.display()
        )));
    }

    for name in [DISEASES_FILE_NAME, REMEDIES_FILE_NAME] {
        if !dir.join(name).is_file() {
            return Err(CatalogError::InvalidInput(format!(
                "{CATALOG_DIR_ENV} override is missing {name}: {}",
                dir.display()
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_or_blank_value_selects_embedded() {
        let cfg = CatalogConfig::from_env_value(None).expect("default config");
        assert_eq!(cfg.source(), &CatalogSource::Embedded);

        let cfg = CatalogConfig::from_env_value(Some("   ".into())).expect("blank value");
        assert_eq!(cfg.source(), &CatalogSource::Embedded);
    }

    #[test]
    fn rejects_non_directory_override() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let missing = temp_dir.path().join("nope");

        let err = CatalogConfig::from_env_value(Some(missing.display().to_string()))
            .expect_err("should reject");
        assert!(matches!(err, CatalogError::InvalidInput(msg) if msg.contains("not a directory")));
    }

    #[test]
    fn rejects_directory_without_catalog_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(temp_dir.path().join(DISEASES_FILE_NAME), "[]").expect("write");

        let err = CatalogConfig::from_env_value(Some(temp_dir.path().display().to_string()))
            .expect_err("should reject");
        assert!(matches!(err, CatalogError::InvalidInput(msg) if msg.contains(REMEDIES_FILE_NAME)));
    }

    #[test]
    fn accepts_complete_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(temp_dir.path().join(DISEASES_FILE_NAME), "[]").expect("write");
        std::fs::write(temp_dir.path().join(REMEDIES_FILE_NAME), "[]").expect("write");

        let cfg = CatalogConfig::from_env_value(Some(temp_dir.path().display().to_string()))
            .expect("valid override");
        assert_eq!(
            cfg.source(),
            &CatalogSource::Directory(temp_dir.path().to_path_buf())
        );
    }
}
