//! # Lung Catalog
//!
//! Reference catalog of lung diseases and natural remedies, plus the query engine that backs the
//! browsing surfaces.
//!
//! This crate contains pure data and pure functions:
//! - Record models ([`Disease`], [`Remedy`]) loaded once from embedded YAML
//! - Free-text search and categorical filters that preserve source order
//! - Facet counts computed over the whole collection
//!
//! **No API concerns**: HTTP servers, CLI parsing and rendering belong in `api-rest`,
//! `api-shared` and `lung-cli`. Callers own the current query state and pass it in on every
//! call; nothing here holds mutable state.

pub mod config;
pub mod constants;
pub mod data;
mod error;
pub mod facet;
pub mod filter;
pub mod model;
pub mod query;

pub use config::{CatalogConfig, CatalogSource};
pub use error::{CatalogError, CatalogResult};
pub use facet::{facet_counts, Facet, FacetCount, FacetCounts, Filter, HasFacet};
pub use filter::{filter_by, search, SearchTerm, Searchable};
pub use model::{Category, Disease, Effectiveness, Remedy, Severity};
pub use query::{query, CatalogQuery, DiseaseQuery, RemedyQuery, ResultSummary};

/// The immutable disease and remedy collections.
///
/// Built once at startup and shared read-only (typically behind an `Arc`).
#[derive(Clone, Debug)]
pub struct Catalog {
    diseases: Vec<Disease>,
    remedies: Vec<Remedy>,
}

impl Catalog {
    /// Build a catalog from already-parsed collections.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if an id repeats within a collection.
    pub fn new(diseases: Vec<Disease>, remedies: Vec<Remedy>) -> CatalogResult<Self> {
        data::ensure_unique_ids("disease", &diseases)?;
        data::ensure_unique_ids("remedy", &remedies)?;
        Ok(Self { diseases, remedies })
    }

    /// The reference data compiled into the binary.
    pub fn embedded() -> CatalogResult<Self> {
        let diseases = data::parse_diseases(data::EMBEDDED_DISEASES)?;
        let remedies = data::parse_remedies(data::EMBEDDED_REMEDIES)?;
        Self::new(diseases, remedies)
    }

    /// Load the catalog selected by `cfg`.
    pub fn load(cfg: &CatalogConfig) -> CatalogResult<Self> {
        let catalog = match cfg.source() {
            CatalogSource::Embedded => Self::embedded()?,
            CatalogSource::Directory(dir) => {
                let (diseases, remedies) = data::read_dir(dir)?;
                Self::new(diseases, remedies)?
            }
        };

        tracing::info!(
            diseases = catalog.diseases.len(),
            remedies = catalog.remedies.len(),
            source = ?cfg.source(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn diseases(&self) -> &[Disease] {
        &self.diseases
    }

    pub fn remedies(&self) -> &[Remedy] {
        &self.remedies
    }

    pub fn disease(&self, id: &str) -> Option<&Disease> {
        self.diseases.iter().find(|disease| disease.id.as_str() == id)
    }

    pub fn remedy(&self, id: &str) -> Option<&Remedy> {
        self.remedies.iter().find(|remedy| remedy.id.as_str() == id)
    }

    /// Every disease holding `severity`, in catalog order.
    pub fn diseases_by_severity(&self, severity: Severity) -> Vec<&Disease> {
        filter_by(&self.diseases, Filter::Only(severity))
    }

    pub fn query_diseases(&self, q: &DiseaseQuery) -> Vec<&Disease> {
        query(&self.diseases, q)
    }

    pub fn query_remedies(&self, q: &RemedyQuery) -> Vec<&Remedy> {
        query(&self.remedies, q)
    }

    pub fn severity_facets(&self) -> FacetCounts<Severity> {
        facet_counts(&self.diseases)
    }

    pub fn category_facets(&self) -> FacetCounts<Category> {
        facet_counts(&self.remedies)
    }

    pub fn effectiveness_facets(&self) -> FacetCounts<Effectiveness> {
        facet_counts(&self.remedies)
    }
}
