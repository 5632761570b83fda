//! Constants used throughout the catalog crate.

/// Filter selector that passes every record.
pub const ALL_FILTER: &str = "all";

/// Filename for the disease collection inside a catalog directory.
pub const DISEASES_FILE_NAME: &str = "diseases.yaml";

/// Filename for the remedy collection inside a catalog directory.
pub const REMEDIES_FILE_NAME: &str = "remedies.yaml";

/// Environment variable naming an on-disk catalog directory that replaces the embedded data.
pub const CATALOG_DIR_ENV: &str = "LUNG_CATALOG_DIR";
