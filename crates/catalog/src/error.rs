#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid {facet} filter value '{value}'")]
    InvalidFilterValue { facet: &'static str, value: String },
    #[error("duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },
    #[error("invalid {kind} record '{id}': {reason}")]
    InvalidRecord {
        kind: &'static str,
        id: String,
        reason: String,
    },
    #[error("translation error: {0}")]
    Translation(String),
    #[error("failed to read catalog file {}: {source}", .path.display())]
    FileRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
